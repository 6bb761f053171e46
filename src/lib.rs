//! Webhook Receiver Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ReceiverConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
