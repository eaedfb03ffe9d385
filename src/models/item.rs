use serde::{Deserialize, Serialize};

// Browse API item summary. Every field is optional upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub item_brand: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub thumbnail_images: Option<Vec<Image>>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub item_web_url: Option<String>,
    #[serde(default)]
    pub seller: Option<Seller>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub item_summaries: Option<Vec<RawItem>>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Stable item shape returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub id: Option<String>,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub seller: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub success: bool,
    pub found: bool,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_found: Option<usize>,
    pub items: Vec<NormalizedItem>,
}

impl LookupResult {
    pub fn not_found(code: String) -> Self {
        Self {
            success: true,
            found: false,
            code,
            total_found: None,
            items: Vec::new(),
        }
    }

    pub fn found(code: String, items: Vec<NormalizedItem>) -> Self {
        Self {
            success: true,
            found: true,
            code,
            total_found: Some(items.len()),
            items,
        }
    }
}
