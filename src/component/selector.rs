//! Eager-startup eligibility.

use crate::component::ComponentDescriptor;
use crate::config::StartupConfig;

pub const DEFAULT_STARTUP_MARKER: &str = "StartUp";
pub const DEFAULT_SINGLETON_MARKER: &str = "ApplicationScoped";

/// Decides which descriptors qualify for eager startup.
///
/// A component qualifies only when it carries both the startup marker and the
/// application-singleton marker. A non-singleton built eagerly would be thrown
/// away and rebuilt on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EagerSelector {
    startup_marker: String,
    singleton_marker: String,
}

impl EagerSelector {
    pub fn new(startup_marker: impl Into<String>, singleton_marker: impl Into<String>) -> Self {
        Self {
            startup_marker: startup_marker.into(),
            singleton_marker: singleton_marker.into(),
        }
    }

    pub fn from_config(config: &StartupConfig) -> Self {
        Self::new(config.startup_marker.clone(), config.singleton_marker.clone())
    }

    pub fn startup_marker(&self) -> &str {
        &self.startup_marker
    }

    pub fn singleton_marker(&self) -> &str {
        &self.singleton_marker
    }

    pub fn is_singleton(&self, descriptor: &ComponentDescriptor) -> bool {
        descriptor.has_marker(&self.singleton_marker)
    }

    pub fn wants_startup(&self, descriptor: &ComponentDescriptor) -> bool {
        descriptor.has_marker(&self.startup_marker)
    }

    /// True when the descriptor must be constructed by the startup sweep.
    pub fn is_eager(&self, descriptor: &ComponentDescriptor) -> bool {
        self.wants_startup(descriptor) && self.is_singleton(descriptor)
    }
}

impl Default for EagerSelector {
    fn default() -> Self {
        Self::new(DEFAULT_STARTUP_MARKER, DEFAULT_SINGLETON_MARKER)
    }
}
