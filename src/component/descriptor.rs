//! Component identity and declared metadata.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identity key of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A declared marker attribute such as `StartUp` or `ApplicationScoped`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Marker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identity plus declared metadata for one discoverable component.
///
/// Equality and hashing consider only the [`ComponentId`], so two descriptors
/// for the same component compare equal even if their markers differ.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDescriptor {
    id: ComponentId,
    type_name: Option<String>,
    markers: BTreeSet<Marker>,
}

impl ComponentDescriptor {
    /// Create a descriptor with no markers.
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            type_name: None,
            markers: BTreeSet::new(),
        }
    }

    /// Attach a declared marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.insert(Marker::new(marker));
        self
    }

    /// Attach several declared markers.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.extend(markers.into_iter().map(Marker::new));
        self
    }

    /// Record the concrete type backing this component (diagnostics only).
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Check whether a marker with the given name was declared.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }
}

impl PartialEq for ComponentDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentDescriptor {}

impl Hash for ComponentDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_name {
            Some(type_name) => write!(f, "{} ({})", self.id, type_name)?,
            None => write!(f, "{}", self.id)?,
        }
        if !self.markers.is_empty() {
            let markers: Vec<&str> = self.markers.iter().map(Marker::as_str).collect();
            write!(f, " [{}]", markers.join(", "))?;
        }
        Ok(())
    }
}
