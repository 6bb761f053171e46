//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log events via the trace span
//! - Metrics are cheap (atomic increments behind the metrics facade)
//! - The exporter is opt-in so the default surface is just the two routes

pub mod logging;
pub mod metrics;
