// proxy module - lookup relay service

pub mod pipeline;
pub mod server;
pub mod token_manager;

pub mod common; // Code normalization
pub mod handlers; // API endpoint handlers
pub mod mappers; // Item shaping and dedup
pub mod middleware; // Axum middleware
pub mod upstream; // Browse API client

pub use pipeline::LookupPipeline;
pub use server::AxumServer;
pub use token_manager::TokenManager;
