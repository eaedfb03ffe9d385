// Upstream client for the Browse API item_summary/search endpoint

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::error::{AppError, AppResult};
use crate::models::{AppConfig, RawItem, SearchResponse};
use crate::proxy::pipeline::{ItemSearch, SearchQuery};

pub const MARKETPLACE_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

pub struct UpstreamClient {
    http_client: Client,
    search_url: String,
    marketplace_id: String,
    limit: u32,
}

impl UpstreamClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http_client: crate::utils::http::create_client(config.request_timeout),
            search_url: config.search_url(),
            marketplace_id: config.marketplace_id.clone(),
            limit: config.search_limit,
        }
    }

    /// Build the search URL for one stage; the query string is form-encoded
    fn build_url(&self, query: &SearchQuery) -> AppResult<url::Url> {
        let limit = self.limit.to_string();
        let params: [(&str, String); 2] = match query {
            SearchQuery::Upc(code) => [("filter", format!("upc:{}", code)), ("limit", limit)],
            SearchQuery::Keyword(code) => [("q", code.clone()), ("limit", limit)],
        };

        url::Url::parse_with_params(&self.search_url, &params)
            .map_err(|e| AppError::UpstreamSearch(format!("Invalid search URL: {}", e)))
    }

    pub async fn search_items(
        &self,
        access_token: &str,
        query: &SearchQuery,
    ) -> AppResult<Vec<RawItem>> {
        let url = self.build_url(query)?;

        let response = self
            .http_client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .header(MARKETPLACE_HEADER, &self.marketplace_id)
            .send()
            .await
            .map_err(|e| AppError::UpstreamSearch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamSearch(format!(
                "Upstream error {}: {}",
                status, body
            )));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamSearch(format!("Parse json failed: {}", e)))?;

        Ok(data.item_summaries.unwrap_or_default())
    }
}

#[async_trait]
impl ItemSearch for UpstreamClient {
    async fn search(&self, access_token: &str, query: &SearchQuery) -> AppResult<Vec<RawItem>> {
        self.search_items(access_token, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";

    fn client_for(server: &MockServer) -> UpstreamClient {
        let mut config = AppConfig::new();
        config.api_base = server.uri();
        UpstreamClient::new(&config)
    }

    #[test]
    fn test_build_url() {
        let client = UpstreamClient::new(&AppConfig::new());

        let upc = client
            .build_url(&SearchQuery::Upc("012345678905".to_string()))
            .unwrap();
        assert_eq!(
            upc.as_str(),
            "https://api.ebay.com/buy/browse/v1/item_summary/search?filter=upc%3A012345678905&limit=10"
        );

        let keyword = client
            .build_url(&SearchQuery::Keyword("ABC123".to_string()))
            .unwrap();
        assert_eq!(
            keyword.as_str(),
            "https://api.ebay.com/buy/browse/v1/item_summary/search?q=ABC123&limit=10"
        );
    }

    #[tokio::test]
    async fn test_upc_search_sends_auth_and_marketplace() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("filter", "upc:012345678905"))
            .and(query_param("limit", "10"))
            .and(header("authorization", "Bearer tok"))
            .and(header("x-ebay-c-marketplace-id", "EBAY_US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "itemSummaries": [{ "itemId": "v1|1|0", "title": "Widget" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .search_items("tok", &SearchQuery::Upc("012345678905".to_string()))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("Widget"));
    }

    #[tokio::test]
    async fn test_missing_summaries_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("q", "nothing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0 })))
            .mount(&server)
            .await;

        let items = client_for(&server)
            .search_items("tok", &SearchQuery::Keyword("nothing".to_string()))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "itemSummaries": [{ "itemId": "slow" }] }))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = AppConfig::new();
        config.api_base = server.uri();
        config.request_timeout = 1;

        let result = UpstreamClient::new(&config)
            .search_items("tok", &SearchQuery::Upc("012345678905".to_string()))
            .await;

        match result {
            Err(AppError::UpstreamSearch(msg)) => assert!(msg.contains("HTTP request failed")),
            other => panic!("Expected upstream error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn test_non_success_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid access token"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .search_items("expired", &SearchQuery::Keyword("x".to_string()))
            .await;

        match result {
            Err(AppError::UpstreamSearch(msg)) => assert!(msg.contains("401")),
            other => panic!("Expected upstream error, got {:?}", other.map(|v| v.len())),
        }
    }
}
