// Lookup Handler
use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Json, Response},
};

use crate::proxy::server::AppState;

/// First `code` value in the query string. Repeated or unrelated keys are ignored.
fn first_code(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}

/// GET /lookup?code=<upc|ean|qr text>
pub async fn handle_lookup(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let code = first_code(query.as_deref());

    match state.pipeline.lookup(code.as_deref()).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /
pub async fn handle_root() -> &'static str {
    "QR Lookup Backend Running"
}
