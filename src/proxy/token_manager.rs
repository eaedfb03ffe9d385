use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::error::AppResult;
use crate::modules::logger::redact;
use crate::modules::oauth::TokenResponse;

/// Used when the issuer omits `expires_in`
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3000;
/// Tokens are treated as expired this long before the server says so
pub const EXPIRY_SKEW_MS: i64 = 60_000;

/// Performs one grant against the token-issuance endpoint
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self) -> AppResult<TokenResponse>;
}

/// Millisecond wall clock
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: i64,
}

impl TokenState {
    fn usable(&self, now: i64) -> Option<&str> {
        match &self.access_token {
            Some(token) if now < self.expires_at => Some(token),
            _ => None,
        }
    }
}

/// Process-wide bearer token cache
pub struct TokenManager {
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
    state: RwLock<TokenState>,
    // Held for the duration of a refresh; late arrivals re-check the state afterwards
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self::with_clock(issuer, Arc::new(SystemClock))
    }

    pub fn with_clock(issuer: Arc<dyn TokenIssuer>, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer,
            clock,
            state: RwLock::new(TokenState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return the cached token, refreshing it first when absent or expired
    pub async fn get_token(&self) -> AppResult<String> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let now = self.clock.now_millis();
        let response = self.issuer.issue().await?;

        let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = now
            .saturating_add(expires_in.saturating_mul(1000))
            .saturating_sub(EXPIRY_SKEW_MS);

        tracing::info!(
            "Access token {} valid for {}s (cached until {})",
            redact(&response.access_token),
            expires_in,
            expires_at
        );

        let mut state = self.state.write().await;
        *state = TokenState {
            access_token: Some(response.access_token.clone()),
            expires_at,
        };

        Ok(response.access_token)
    }

    /// Whether a call to `get_token` would be served from cache
    pub async fn is_valid(&self) -> bool {
        self.cached().await.is_some()
    }

    /// Drop the cached token so the next call refreshes
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        *state = TokenState::default();
        tracing::debug!("Access token invalidated");
    }

    pub async fn expires_at(&self) -> i64 {
        self.state.read().await.expires_at
    }

    async fn cached(&self) -> Option<String> {
        let now = self.clock.now_millis();
        let state = self.state.read().await;
        state.usable(now).map(str::to_string)
    }
}
