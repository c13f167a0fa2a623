//! Outcome of the registration phase and of the startup sweep.

use std::time::Duration;

use serde::Serialize;

use crate::component::{ComponentDescriptor, ComponentId};

/// Snapshot of what the sweep will do, taken before it runs.
#[derive(Debug, Clone, Serialize)]
pub struct StartupPlan {
    pub startup_marker: String,
    pub singleton_marker: String,
    /// Eager components in the order they will be initialized.
    pub eager: Vec<ComponentDescriptor>,
    /// Components seen during registration that the sweep will not touch.
    pub deferred: Vec<ComponentId>,
    pub processed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializedComponent {
    pub component: ComponentId,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedComponent {
    pub component: ComponentId,
    pub error: String,
}

/// Result of a completed sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StartupReport {
    /// Number of distinct components seen during registration.
    pub processed: usize,
    /// Successfully initialized eager components, in registration order.
    pub initialized: Vec<InitializedComponent>,
    /// Failures tolerated under the best-effort policy, in registration order.
    pub failed: Vec<FailedComponent>,
    pub elapsed: Duration,
}

impl StartupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn initialized_ids(&self) -> Vec<&str> {
        self.initialized.iter().map(|c| c.component.as_str()).collect()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|c| c.component.as_str()).collect()
    }
}
