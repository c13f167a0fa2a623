//! Thread-safe registration front-end.
//!
//! For hosts that discover components on several threads. Candidates are
//! stamped with a sequence number on first insertion; [`SharedRegistrar::freeze`]
//! replays them in that order into a [`StartupRegistrar`] for the sweep.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::component::{ComponentDescriptor, ComponentId, EagerSelector};
use crate::config::StartupConfig;
use crate::lifecycle::registry::{EagerStartRegistry, ProcessedRegistry};
use crate::lifecycle::startup::StartupRegistrar;
use crate::observability::metrics;

pub struct SharedRegistrar {
    config: StartupConfig,
    selector: EagerSelector,
    next_seq: AtomicU64,
    eager: DashMap<ComponentId, (u64, ComponentDescriptor)>,
    processed: DashMap<ComponentId, u64>,
}

impl SharedRegistrar {
    pub fn new(config: &StartupConfig) -> Self {
        Self {
            config: config.clone(),
            selector: EagerSelector::from_config(config),
            next_seq: AtomicU64::new(0),
            eager: DashMap::new(),
            processed: DashMap::new(),
        }
    }

    /// Registration phase callback, callable from any thread.
    pub fn on_component_candidate(&self, descriptor: &ComponentDescriptor) {
        let id = descriptor.id();
        let eager = self.selector.is_eager(descriptor);

        if eager {
            match self.eager.entry(id.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(component = %id, "Eager component offered again, ignoring");
                }
                Entry::Vacant(slot) => {
                    let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                    slot.insert((seq, descriptor.clone()));
                    tracing::info!(component = %descriptor, "New eager startup component found");
                }
            }
        }

        if let Entry::Vacant(slot) = self.processed.entry(id.clone()) {
            slot.insert(self.next_seq.fetch_add(1, Ordering::Relaxed));
            metrics::record_candidate(eager);
        }
    }

    pub fn eager_count(&self) -> usize {
        self.eager.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// End the registration phase, ordering both registries by first insertion.
    pub fn freeze(self) -> StartupRegistrar {
        let mut eager: Vec<(u64, ComponentDescriptor)> =
            self.eager.into_iter().map(|(_, entry)| entry).collect();
        eager.sort_by_key(|(seq, _)| *seq);

        let mut processed: Vec<(u64, ComponentId)> =
            self.processed.into_iter().map(|(id, seq)| (seq, id)).collect();
        processed.sort_by_key(|(seq, _)| *seq);

        let mut eager_registry = EagerStartRegistry::new();
        for (_, descriptor) in &eager {
            eager_registry.insert(descriptor);
        }
        let mut processed_registry = ProcessedRegistry::new();
        for (_, id) in &processed {
            processed_registry.insert(id);
        }

        StartupRegistrar::from_registries(&self.config, eager_registry, processed_registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequential_offers_keep_order() {
        let shared = SharedRegistrar::new(&StartupConfig::default());
        for name in ["b", "a", "c"] {
            shared.on_component_candidate(
                &ComponentDescriptor::new(name).with_markers(["StartUp", "ApplicationScoped"]),
            );
        }
        shared.on_component_candidate(&ComponentDescriptor::new("lazy"));

        let registrar = shared.freeze();
        let order: Vec<&str> = registrar.eager_components().map(|d| d.id().as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(registrar.processed_count(), 4);
    }

    #[test]
    fn test_concurrent_duplicates_collapse() {
        let shared = Arc::new(SharedRegistrar::new(&StartupConfig::default()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..50 {
                        let desc = ComponentDescriptor::new(format!("component-{}", i % 10))
                            .with_markers(["StartUp", "ApplicationScoped"]);
                        shared.on_component_candidate(&desc);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.eager_count(), 10);
        assert_eq!(shared.processed_count(), 10);

        let shared = Arc::try_unwrap(shared).ok().unwrap();
        let registrar = shared.freeze();
        assert_eq!(registrar.eager_count(), 10);
    }
}
