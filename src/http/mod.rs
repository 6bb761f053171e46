//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layering)
//!     → request.rs (add request ID)
//!     → handlers.rs (route handlers, payload decode)
//!     → error.rs (failures → opaque 500)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::HandlerError;
pub use request::{RequestIdMaker, X_REQUEST_ID};
pub use server::HttpServer;
