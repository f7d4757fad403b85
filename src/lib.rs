//! Little Lemon restaurant site library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod messages;
pub mod observability;
pub mod restaurant;
pub mod routing;
pub mod security;
pub mod store;
pub mod templates;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::SqliteStore;
