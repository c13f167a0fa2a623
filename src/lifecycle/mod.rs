//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Registration phase (startup.rs / concurrent.rs):
//!     host discovers component → on_component_candidate
//!     → registry.rs (eager-start + processed, insertion ordered)
//!
//! Registration complete (startup.rs):
//!     on_registration_complete(resolver)
//!     → resolver.rs (host builds each eager component, result discarded)
//!     → report.rs (initialized / failed components)
//! ```
//!
//! # Design Decisions
//! - Exactly two phases, entered once: the sweep consumes the registrar
//! - Eager means startup marker AND singleton marker; anything else stays lazy
//! - Failure policy is configuration (fail-fast default, best-effort optional)
//! - No timeouts or cancellation: the sweep runs to completion or fails

pub mod concurrent;
pub mod error;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod startup;

pub use concurrent::SharedRegistrar;
pub use error::StartupError;
pub use report::{StartupPlan, StartupReport};
pub use resolver::{BoxError, Resolver};
pub use startup::StartupRegistrar;
