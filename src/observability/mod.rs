//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registrar, host container:
//!     → logging.rs (structured log events, one `boot` span per boot)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus text snapshot printed by the CLI
//! ```

pub mod logging;
pub mod metrics;
