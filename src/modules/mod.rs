pub mod config;
pub mod logger;
pub mod oauth;

pub use config::load_app_config;
pub use logger::init_logger;
