//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use startup_registrar::lifecycle::BoxError;
use startup_registrar::{ComponentDescriptor, Resolver};

/// Descriptor carrying both the startup and singleton markers.
pub fn eager(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(name).with_markers(["StartUp", "ApplicationScoped"])
}

/// Descriptor carrying only the singleton marker.
pub fn singleton(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(name).with_marker("ApplicationScoped")
}

/// Descriptor carrying only the startup marker.
pub fn startup_only(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(name).with_marker("StartUp")
}

/// Resolver that records every request and fails for selected components.
#[derive(Default)]
pub struct RecordingResolver {
    calls: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(names: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Resolver for RecordingResolver {
    fn resolve_and_discard(&self, descriptor: &ComponentDescriptor) -> Result<(), BoxError> {
        let name = descriptor.id().to_string();
        self.calls.lock().unwrap().push(name.clone());
        if self.failing.contains(&name) {
            return Err(format!("{} refused to start", name).into());
        }
        Ok(())
    }
}
