pub mod config;
pub mod item;

pub use config::{AppConfig, Credentials};
pub use item::{LookupResult, NormalizedItem, RawItem, SearchResponse};
