//! Component metadata subsystem.
//!
//! # Data Flow
//! ```text
//! host discovery
//!     → descriptor.rs (identity + declared markers)
//!     → selector.rs (eager-startup eligibility)
//!     → lifecycle registrar (registration phase)
//! ```
//!
//! # Design Decisions
//! - Descriptors are plain data: markers are decided when the descriptor is built
//! - Identity is the component name; markers never participate in equality
//! - Marker names are configuration, so eligibility lives in a separate selector

pub mod descriptor;
pub mod selector;

pub use descriptor::{ComponentDescriptor, ComponentId, Marker};
pub use selector::EagerSelector;
