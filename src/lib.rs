//! Eager startup of application singletons.
//!
//! A [`StartupRegistrar`] observes a host runtime's registration phase, keeps
//! the components marked for eager startup that are application singletons,
//! and builds them as soon as registration completes.

pub mod component;
pub mod config;
pub mod demo;
pub mod host;
pub mod lifecycle;
pub mod observability;

pub use component::{ComponentDescriptor, ComponentId, EagerSelector};
pub use config::BootConfig;
pub use host::{Component, Container, ContainerBuilder};
pub use lifecycle::{Resolver, SharedRegistrar, StartupError, StartupRegistrar, StartupReport};
