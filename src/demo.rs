//! Demo components for the `run` command.
//!
//! - `name-loader`: eager singleton, loads its roster in the on-ready hook
//! - `band-catalog`: singleton without the startup marker, built on first use
//! - `audit-trail`: startup marker without singleton scope, never swept

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use crate::component::ComponentDescriptor;
use crate::config::{DemoConfig, StartupConfig};
use crate::host::{Component, ContainerBuilder};
use crate::lifecycle::BoxError;

const ROSTER: &[&str] = &[
    "Goku", "Vegeta", "Gohan", "Piccolo", "Krillin", "Bulma", "Trunks", "Goten",
    "Tien", "Yamcha", "Chiaotzu", "Master Roshi", "Android 18", "Android 17", "Frieza",
    "Cell", "Majin Buu", "Beerus", "Whis", "Videl",
];

const BANDS: &[(&str, &str)] = &[
    ("The Velvet Underground", "Rock"),
    ("Kraftwerk", "Electronic"),
    ("Miles Davis Quintet", "Jazz"),
    ("Portishead", "Trip Hop"),
];

/// Eager singleton whose on-ready hook loads a set of names.
#[derive(Debug)]
pub struct NameLoader {
    warmup: Duration,
    count: usize,
    names: BTreeSet<String>,
}

impl NameLoader {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            warmup: Duration::from_millis(config.warmup_ms),
            count: config.name_count,
            names: BTreeSet::new(),
        }
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }
}

impl Component for NameLoader {
    fn on_ready(&mut self) -> Result<(), BoxError> {
        tracing::info!(warmup_ms = self.warmup.as_millis() as u64, "Name loader warming up");
        if !self.warmup.is_zero() {
            thread::sleep(self.warmup);
        }
        self.names = ROSTER.iter().take(self.count).map(|name| name.to_string()).collect();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub name: String,
    pub genre: String,
}

/// Lazy singleton, built by the first caller.
#[derive(Debug, Default)]
pub struct BandCatalog {
    bands: Vec<Band>,
}

impl BandCatalog {
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}

impl Component for BandCatalog {
    fn on_ready(&mut self) -> Result<(), BoxError> {
        self.bands = BANDS
            .iter()
            .map(|(name, genre)| Band {
                name: name.to_string(),
                genre: genre.to_string(),
            })
            .collect();
        tracing::info!(bands = self.bands.len(), "Band catalog loaded on demand");
        Ok(())
    }
}

/// Marked for startup but not a singleton, so the sweep leaves it alone.
#[derive(Debug, Default)]
pub struct AuditTrail;

impl Component for AuditTrail {
    fn on_ready(&mut self) -> Result<(), BoxError> {
        tracing::info!("Audit trail opened");
        Ok(())
    }
}

/// Register the demo components using the configured marker names.
pub fn register(
    builder: ContainerBuilder,
    startup: &StartupConfig,
    demo: &DemoConfig,
) -> ContainerBuilder {
    let startup_marker = startup.startup_marker.as_str();
    let singleton_marker = startup.singleton_marker.as_str();
    let demo = demo.clone();

    builder
        .register(
            ComponentDescriptor::new("name-loader")
                .with_markers([startup_marker, singleton_marker]),
            move || Ok(NameLoader::new(&demo)),
        )
        .register(
            ComponentDescriptor::new("band-catalog").with_marker(singleton_marker),
            || Ok(BandCatalog::default()),
        )
        .register(
            ComponentDescriptor::new("audit-trail").with_marker(startup_marker),
            || Ok(AuditTrail),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_boot() {
        let startup = StartupConfig::default();
        let demo = DemoConfig {
            warmup_ms: 0,
            name_count: 5,
        };
        let container = register(ContainerBuilder::new(), &startup, &demo)
            .boot(&startup)
            .unwrap();

        assert_eq!(container.startup_report().initialized_ids(), vec!["name-loader"]);
        assert_eq!(container.construction_count("name-loader"), 1);
        assert_eq!(container.construction_count("band-catalog"), 0);
        assert_eq!(container.construction_count("audit-trail"), 0);

        let loader = container.select::<NameLoader>().unwrap();
        assert_eq!(loader.names().len(), 5);
        assert_eq!(container.construction_count("name-loader"), 1);

        let catalog = container.select::<BandCatalog>().unwrap();
        assert_eq!(catalog.bands().len(), BANDS.len());
    }
}
