//! Host runtime subsystem.
//!
//! # Data Flow
//! ```text
//! ContainerBuilder::register (descriptor + factory)
//!     → boot: every descriptor offered to the StartupRegistrar, in order
//!     → Container (implements Resolver)
//!     → sweep builds eager singletons through the container
//!     → application code resolves components on demand
//! ```

pub mod container;
pub mod error;

pub use container::{Component, Container, ContainerBuilder};
pub use error::ResolveError;
