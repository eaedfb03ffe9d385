use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{AppConfig, Credentials};
use crate::proxy::token_manager::TokenIssuer;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Which grant the token endpoint is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    RefreshToken,
    ClientCredentials,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::RefreshToken => "refresh_token",
            GrantType::ClientCredentials => "client_credentials",
        }
    }
}

/// Token-issuance client (HTTP Basic auth + form-urlencoded grant)
pub struct OAuthClient {
    http_client: Client,
    token_url: String,
    scope: String,
    credentials: Credentials,
}

impl OAuthClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http_client: crate::utils::http::create_client(config.request_timeout),
            token_url: config.token_url(),
            scope: config.oauth_scope.clone(),
            credentials: config.credentials.clone(),
        }
    }

    pub fn grant_type(&self) -> GrantType {
        if self.credentials.refresh_token.is_some() {
            GrantType::RefreshToken
        } else {
            GrantType::ClientCredentials
        }
    }

    /// `Basic base64(client_id:client_secret)`
    fn basic_auth_header(&self) -> AppResult<String> {
        match (&self.credentials.client_id, &self.credentials.client_secret) {
            (Some(id), Some(secret)) => Ok(format!(
                "Basic {}",
                STANDARD.encode(format!("{}:{}", id, secret))
            )),
            _ => Err(AppError::Auth(
                "Missing EBAY_CLIENT_ID or EBAY_CLIENT_SECRET".to_string(),
            )),
        }
    }

    fn form_params(&self) -> Vec<(&'static str, &str)> {
        let grant = self.grant_type();
        let mut params = vec![("grant_type", grant.as_str())];
        if let Some(refresh_token) = &self.credentials.refresh_token {
            params.push(("refresh_token", refresh_token.as_str()));
        }
        params.push(("scope", self.scope.as_str()));
        params
    }

    /// Exchange the configured credentials for a new access token
    pub async fn request_token(&self) -> AppResult<TokenResponse> {
        let authorization = self.basic_auth_header()?;

        tracing::info!(
            "Refreshing eBay access token (grant: {})...",
            self.grant_type().as_str()
        );

        let response = self
            .http_client
            .post(&self.token_url)
            .header(header::AUTHORIZATION, authorization)
            .form(&self.form_params())
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "Token refresh failed ({}): {}",
                status, error_text
            )));
        }

        let token_data = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::Auth(format!("Token parsing failed: {}", e)))?;

        tracing::info!(
            "eBay token refreshed OK, expires in: {:?} seconds",
            token_data.expires_in
        );
        Ok(token_data)
    }
}

#[async_trait]
impl TokenIssuer for OAuthClient {
    async fn issue(&self) -> AppResult<TokenResponse> {
        self.request_token().await
    }
}
