use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::models::AppConfig;

/// Merge `.env` into the process environment. Runs before the logger exists.
pub fn load_dotenv() -> AppResult<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(AppError::Config(format!("Failed to read .env file: {}", e))),
    }
}

/// Directory for rolling log files, if any
pub fn log_dir() -> Option<String> {
    std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty())
}

/// Load application config from the process environment
pub fn load_app_config() -> AppResult<AppConfig> {
    load_from(|key| std::env::var(key).ok())
}

/// Build config from an arbitrary variable source. Empty values count as unset.
pub fn load_from<F>(lookup: F) -> AppResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut config = AppConfig::new();

    config.credentials.client_id = get("EBAY_CLIENT_ID");
    config.credentials.client_secret = get("EBAY_CLIENT_SECRET");
    config.credentials.refresh_token = get("EBAY_REFRESH_TOKEN");

    if let Some(v) = get("EBAY_MARKETPLACE_ID") {
        config.marketplace_id = v;
    }
    if let Some(v) = get("EBAY_API_BASE") {
        config.api_base = v;
    }
    if let Some(v) = get("EBAY_OAUTH_SCOPE") {
        config.oauth_scope = v;
    }
    if let Some(v) = get("EBAY_SEARCH_LIMIT") {
        config.search_limit = parse_var("EBAY_SEARCH_LIMIT", &v)?;
    }
    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        config.request_timeout = parse_var("REQUEST_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("HOST") {
        config.host = v;
    }
    if let Some(v) = get("PORT") {
        config.port = parse_var("PORT", &v)?;
    }

    if config.credentials.client_id.is_none() || config.credentials.client_secret.is_none() {
        tracing::warn!("EBAY_CLIENT_ID / EBAY_CLIENT_SECRET not set, lookups will fail");
    }
    if config.credentials.refresh_token.is_none() {
        tracing::warn!("EBAY_REFRESH_TOKEN not set, falling back to client-credentials grant");
    }

    Ok(config)
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("Invalid value for {}: {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let vars = env(&[]);
        let config = load_from(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.marketplace_id, "EBAY_US");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout, 15);
        assert_eq!(config.search_limit, 10);
        assert!(config.credentials.refresh_token.is_none());
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let vars = env(&[
            ("EBAY_CLIENT_ID", "my-app"),
            ("EBAY_CLIENT_SECRET", "secret"),
            ("EBAY_REFRESH_TOKEN", "   "),
            ("EBAY_MARKETPLACE_ID", "EBAY_GB"),
            ("PORT", "8080"),
        ]);
        let config = load_from(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.credentials.client_id.as_deref(), Some("my-app"));
        assert!(config.credentials.refresh_token.is_none());
        assert_eq!(config.marketplace_id, "EBAY_GB");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port() {
        let vars = env(&[("PORT", "eighty")]);
        let err = load_from(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
