//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BootConfig (validated, immutable)
//!     → passed by reference to the registrar, host and observability
//!
//! manifest file (TOML)
//!     → manifest.rs (component list)
//!     → ComponentDescriptor values for the registration phase
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a boot reads it exactly once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod manifest;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use manifest::ComponentManifest;
pub use schema::BootConfig;
pub use schema::DemoConfig;
pub use schema::FailurePolicy;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::StartupConfig;
pub use schema::SweepMode;
