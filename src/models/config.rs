use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKETPLACE_ID: &str = "EBAY_US";
pub const DEFAULT_API_BASE: &str = "https://api.ebay.com";
pub const DEFAULT_OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

/// Marketplace credentials, read once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: Option<String>,
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Absent means the client-credentials grant is used instead
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub marketplace_id: String,
    pub api_base: String,
    pub oauth_scope: String,
    pub search_limit: u32,
    pub request_timeout: u64, // Seconds
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            credentials: Credentials::default(),
            marketplace_id: DEFAULT_MARKETPLACE_ID.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            oauth_scope: DEFAULT_OAUTH_SCOPE.to_string(),
            search_limit: 10,
            request_timeout: 15,
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/identity/v1/oauth2/token",
            self.api_base.trim_end_matches('/')
        )
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/buy/browse/v1/item_summary/search",
            self.api_base.trim_end_matches('/')
        )
    }

    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
