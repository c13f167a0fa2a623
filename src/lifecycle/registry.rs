//! Insertion-ordered registries filled during the registration phase.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

use crate::component::{ComponentDescriptor, ComponentId};

/// Components flagged for eager startup, keyed by identity.
///
/// The first descriptor offered for an identity wins; later offers are no-ops.
#[derive(Debug, Default)]
pub struct EagerStartRegistry {
    entries: IndexMap<ComponentId, ComponentDescriptor>,
}

impl EagerStartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the identity was already present.
    pub fn insert(&mut self, descriptor: &ComponentDescriptor) -> bool {
        match self.entries.entry(descriptor.id().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(descriptor.clone());
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ComponentDescriptor> {
        self.entries.values()
    }

    pub fn get_index(&self, index: usize) -> Option<&ComponentDescriptor> {
        self.entries.get_index(index).map(|(_, desc)| desc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every identity seen during registration. Diagnostic only.
#[derive(Debug, Default)]
pub struct ProcessedRegistry {
    seen: IndexSet<ComponentId>,
}

impl ProcessedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &ComponentId) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ComponentId> {
        self.seen.iter()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eager_registry_keeps_first_offer() {
        let mut registry = EagerStartRegistry::new();
        let first = ComponentDescriptor::new("a").with_type_name("First");
        let second = ComponentDescriptor::new("a").with_type_name("Second");

        assert!(registry.insert(&first));
        assert!(!registry.insert(&second));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().type_name(), Some("First"));
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = EagerStartRegistry::new();
        for name in ["c", "a", "b", "a"] {
            registry.insert(&ComponentDescriptor::new(name));
        }

        let order: Vec<&str> = registry.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(registry.get_index(1).map(|d| d.id().as_str()), Some("a"));
    }

    #[test]
    fn test_processed_registry() {
        let mut registry = ProcessedRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.insert(&ComponentId::new("x")));
        assert!(!registry.insert(&ComponentId::new("x")));
        assert!(registry.insert(&ComponentId::new("y")));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("y"));
    }
}
