//! Two-stage lookup: UPC filter first, free-text only when that yields nothing.
//!
//! Search failures never fail a lookup. Each stage resolves to a
//! [`StageOutcome`]; failed stages are logged and count as empty when the
//! response is built, so a double failure reads as "not found".

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{LookupResult, RawItem};
use crate::proxy::common::code::normalize_code;
use crate::proxy::mappers::item::dedup_and_shape;
use crate::proxy::TokenManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Structured `filter=upc:<code>`
    Upc(String),
    /// Free-text `q=<code>`
    Keyword(String),
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchQuery::Upc(code) => write!(f, "upc:{}", code),
            SearchQuery::Keyword(code) => write!(f, "q:{}", code),
        }
    }
}

#[async_trait]
pub trait ItemSearch: Send + Sync {
    async fn search(&self, access_token: &str, query: &SearchQuery) -> AppResult<Vec<RawItem>>;
}

#[derive(Debug)]
pub enum StageOutcome {
    Items(Vec<RawItem>),
    Failed(String),
}

impl StageOutcome {
    pub fn into_items(self) -> Vec<RawItem> {
        match self {
            StageOutcome::Items(items) => items,
            StageOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StageOutcome::Items(items) => items.is_empty(),
            StageOutcome::Failed(_) => true,
        }
    }
}

pub struct LookupPipeline {
    token_manager: Arc<TokenManager>,
    search: Arc<dyn ItemSearch>,
}

impl LookupPipeline {
    pub fn new(token_manager: Arc<TokenManager>, search: Arc<dyn ItemSearch>) -> Self {
        Self {
            token_manager,
            search,
        }
    }

    /// Validate `raw_code`, run both stages as needed and shape the result
    pub async fn lookup(&self, raw_code: Option<&str>) -> AppResult<LookupResult> {
        let raw_code = match raw_code {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(AppError::Validation("Missing ?code=".to_string())),
        };

        let code = normalize_code(raw_code);
        if code.is_empty() {
            return Err(AppError::Validation("Invalid code".to_string()));
        }

        let token = self.token_manager.get_token().await?;

        let mut collected = self
            .run_stage(&token, SearchQuery::Upc(code.clone()))
            .await
            .into_items();

        if collected.is_empty() {
            collected = self
                .run_stage(&token, SearchQuery::Keyword(code.clone()))
                .await
                .into_items();
        }

        if collected.is_empty() {
            tracing::info!("No items found for code {}", code);
            return Ok(LookupResult::not_found(code));
        }

        let items = dedup_and_shape(collected);
        tracing::info!("Found {} unique items for code {}", items.len(), code);

        Ok(LookupResult::found(code, items))
    }

    async fn run_stage(&self, token: &str, query: SearchQuery) -> StageOutcome {
        match self.search.search(token, &query).await {
            Ok(items) => {
                tracing::debug!("Search {} returned {} items", query, items.len());
                StageOutcome::Items(items)
            }
            Err(e) => {
                tracing::warn!("Search {} failed, treating as empty: {}", query, e);
                StageOutcome::Failed(e.to_string())
            }
        }
    }
}
