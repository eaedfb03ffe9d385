// Request logging middleware
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;

/// Tag each request with an id and log method, URI, status and latency
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let span = tracing::info_span!("request", id = %&request_id[..8]);

    async move {
        tracing::info!("Request: {} {}", method, uri);
        let start = Instant::now();

        let response = next.run(request).await;

        tracing::info!(
            "Response: {} {} -> {} ({} ms)",
            method,
            uri.path(),
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
        response
    }
    .instrument(span)
    .await
}
