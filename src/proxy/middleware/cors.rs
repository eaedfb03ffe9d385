use tower_http::cors::{Any, CorsLayer};

/// The relay is called from browser scanners on arbitrary origins
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
