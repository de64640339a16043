//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gatekeeper, authority client, proxy handler produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
