// Raw item summary -> normalized item, plus cross-stage dedup

use std::collections::HashSet;

use crate::models::{NormalizedItem, RawItem};

/// Item id, else web URL. Empty strings do not count.
pub fn dedup_key(item: &RawItem) -> Option<&str> {
    item.item_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| item.item_web_url.as_deref().filter(|s| !s.is_empty()))
}

pub fn map_item_summary(item: RawItem) -> NormalizedItem {
    let (price, currency) = match item.price {
        Some(p) => (p.value, p.currency),
        None => (None, None),
    };

    let image = item
        .thumbnail_images
        .and_then(|images| images.into_iter().next())
        .and_then(|img| img.image_url)
        .or_else(|| item.image.and_then(|img| img.image_url));

    NormalizedItem {
        id: item.item_id,
        title: item.title,
        brand: item.brand.or(item.item_brand),
        condition: item.condition,
        price,
        currency,
        image,
        url: item.item_web_url,
        seller: item.seller.and_then(|s| s.username),
    }
}

/// Keep the first occurrence of each key in encounter order; keyless items are dropped
pub fn dedup_and_shape(items: Vec<RawItem>) -> Vec<NormalizedItem> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let key = match dedup_key(&item) {
            Some(key) => key.to_string(),
            None => {
                tracing::debug!("Dropping item without id or url: {:?}", item.title);
                continue;
            }
        };
        if seen.insert(key) {
            unique.push(map_item_summary(item));
        }
    }

    unique
}
