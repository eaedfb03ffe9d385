use reqwest::Client;
use std::time::Duration;

/// Create an HTTP client with a bounded per-request timeout
pub fn create_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("barcode-lookup/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client, using defaults: {}", e);
            Client::new()
        })
}
