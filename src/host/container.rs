//! Minimal component host.
//!
//! # Responsibilities
//! - Hold component factories keyed by identity
//! - Drive the registrar through both lifecycle phases at boot
//! - Cache application singletons, build everything else per resolution
//!
//! # Design Decisions
//! - Each singleton has its own lock, so its on-ready hook fires at most once
//!   even when resolved concurrently
//! - Registration order is discovery order
//! - No injection: factories are plain closures

use std::any::{type_name, Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use indexmap::map::Entry;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::component::{ComponentDescriptor, ComponentId, EagerSelector};
use crate::config::StartupConfig;
use crate::host::error::ResolveError;
use crate::lifecycle::{BoxError, Resolver, StartupError, StartupRegistrar, StartupReport};

/// A unit managed by the [`Container`].
pub trait Component: Send + Sync + 'static {
    /// On-ready hook, run once right after the factory returns.
    fn on_ready(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>;

struct Registration {
    descriptor: ComponentDescriptor,
    type_id: TypeId,
    singleton: bool,
    factory: Factory,
    instance: Mutex<Option<Instance>>,
    constructions: AtomicUsize,
}

impl Registration {
    fn construct(&self) -> Result<Instance, ResolveError> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        (self.factory)().map_err(|source| ResolveError::Construction {
            component: self.descriptor.id().clone(),
            source,
        })
    }

    fn instance(&self) -> Result<Instance, ResolveError> {
        if !self.singleton {
            return self.construct();
        }

        let mut slot = self
            .instance
            .lock()
            .map_err(|_| ResolveError::Poisoned(self.descriptor.id().clone()))?;
        if let Some(existing) = slot.as_ref() {
            return Ok(Arc::clone(existing));
        }
        let created = self.construct()?;
        *slot = Some(Arc::clone(&created));
        Ok(created)
    }
}

/// Collects component registrations before boot.
#[derive(Default)]
pub struct ContainerBuilder {
    registrations: IndexMap<ComponentId, Registration>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component with the factory that builds it.
    ///
    /// A second registration under an existing identity is ignored.
    pub fn register<T, F>(mut self, descriptor: ComponentDescriptor, factory: F) -> Self
    where
        T: Component,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let descriptor = match descriptor.type_name() {
            Some(_) => descriptor,
            None => descriptor.with_type_name(type_name::<T>()),
        };

        match self.registrations.entry(descriptor.id().clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    component = %descriptor.id(),
                    "Component already registered, ignoring"
                );
            }
            Entry::Vacant(slot) => {
                let factory: Factory = Box::new(move || {
                    let mut component = factory()?;
                    component.on_ready()?;
                    Ok(Arc::new(component) as Instance)
                });
                slot.insert(Registration {
                    descriptor,
                    type_id: TypeId::of::<T>(),
                    singleton: false,
                    factory,
                    instance: Mutex::new(None),
                    constructions: AtomicUsize::new(0),
                });
            }
        }
        self
    }

    /// Run the registration phase and the startup sweep, then hand out the container.
    pub fn boot(mut self, config: &StartupConfig) -> Result<Container, StartupError> {
        let boot_id = Uuid::new_v4();
        let span = tracing::info_span!("boot", %boot_id);
        let _enter = span.enter();

        let selector = EagerSelector::from_config(config);
        let mut registrar = StartupRegistrar::new(config);
        for registration in self.registrations.values_mut() {
            registration.singleton = selector.is_singleton(&registration.descriptor);
            registrar.on_component_candidate(&registration.descriptor);
        }

        let mut container = Container {
            boot_id,
            registrations: self.registrations,
            report: StartupReport::default(),
        };
        container.report = registrar.on_registration_complete(&container)?;
        Ok(container)
    }
}

/// A booted set of components.
pub struct Container {
    boot_id: Uuid,
    registrations: IndexMap<ComponentId, Registration>,
    report: StartupReport,
}

impl Container {
    pub fn boot_id(&self) -> Uuid {
        self.boot_id
    }

    /// Report of the startup sweep that ran during boot.
    pub fn startup_report(&self) -> &StartupReport {
        &self.report
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.registrations.values().map(|r| &r.descriptor)
    }

    /// How many times the component's factory and on-ready hook have run.
    pub fn construction_count(&self, id: &str) -> usize {
        self.registrations
            .get(id)
            .map(|r| r.constructions.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Resolve a component by identity.
    pub fn resolve<T: Component>(&self, id: &str) -> Result<Arc<T>, ResolveError> {
        let registration = self
            .registrations
            .get(id)
            .ok_or_else(|| ResolveError::UnknownComponent(ComponentId::new(id)))?;
        downcast(registration)
    }

    /// Resolve the first component registered with type `T`.
    pub fn select<T: Component>(&self) -> Result<Arc<T>, ResolveError> {
        let wanted = TypeId::of::<T>();
        let registration = self
            .registrations
            .values()
            .find(|r| r.type_id == wanted)
            .ok_or(ResolveError::UnknownType(type_name::<T>()))?;
        downcast(registration)
    }
}

fn downcast<T: Component>(registration: &Registration) -> Result<Arc<T>, ResolveError> {
    if registration.type_id != TypeId::of::<T>() {
        return Err(ResolveError::TypeMismatch {
            component: registration.descriptor.id().clone(),
            expected: type_name::<T>(),
        });
    }
    registration
        .instance()?
        .downcast::<T>()
        .map_err(|_| ResolveError::TypeMismatch {
            component: registration.descriptor.id().clone(),
            expected: type_name::<T>(),
        })
}

impl Resolver for Container {
    fn resolve_and_discard(&self, descriptor: &ComponentDescriptor) -> Result<(), BoxError> {
        let registration = self
            .registrations
            .get(descriptor.id().as_str())
            .ok_or_else(|| ResolveError::UnknownComponent(descriptor.id().clone()))?;
        registration.instance()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        ready: bool,
    }

    impl Component for Counter {
        fn on_ready(&mut self) -> Result<(), BoxError> {
            self.ready = true;
            Ok(())
        }
    }

    struct Other;
    impl Component for Other {}

    #[test]
    fn test_singleton_is_cached() {
        let container = ContainerBuilder::new()
            .register(ComponentDescriptor::new("counter").with_marker("ApplicationScoped"), || {
                Ok(Counter::default())
            })
            .boot(&StartupConfig::default())
            .unwrap();

        // Not eager: nothing built during boot
        assert_eq!(container.construction_count("counter"), 0);

        let a = container.resolve::<Counter>("counter").unwrap();
        let b = container.resolve::<Counter>("counter").unwrap();
        assert!(a.ready);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(container.construction_count("counter"), 1);
    }

    #[test]
    fn test_non_singleton_built_per_resolution() {
        let container = ContainerBuilder::new()
            .register(ComponentDescriptor::new("counter"), || Ok(Counter::default()))
            .boot(&StartupConfig::default())
            .unwrap();

        let a = container.resolve::<Counter>("counter").unwrap();
        let b = container.resolve::<Counter>("counter").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(container.construction_count("counter"), 2);
    }

    #[test]
    fn test_type_mismatch_and_unknown() {
        let container = ContainerBuilder::new()
            .register(ComponentDescriptor::new("counter"), || Ok(Counter::default()))
            .boot(&StartupConfig::default())
            .unwrap();

        assert!(matches!(
            container.resolve::<Other>("counter"),
            Err(ResolveError::TypeMismatch { .. })
        ));
        assert!(matches!(
            container.resolve::<Counter>("missing"),
            Err(ResolveError::UnknownComponent(_))
        ));
        assert!(matches!(container.select::<Other>(), Err(ResolveError::UnknownType(_))));
        // A failed type check never constructs
        assert_eq!(container.construction_count("counter"), 0);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let container = ContainerBuilder::new()
            .register(ComponentDescriptor::new("x"), || Ok(Counter::default()))
            .register(ComponentDescriptor::new("x"), || Ok(Other))
            .boot(&StartupConfig::default())
            .unwrap();

        assert_eq!(container.descriptors().count(), 1);
        assert!(container.select::<Counter>().is_ok());
    }

    #[test]
    fn test_type_name_recorded() {
        let container = ContainerBuilder::new()
            .register(ComponentDescriptor::new("counter"), || Ok(Counter::default()))
            .boot(&StartupConfig::default())
            .unwrap();

        let desc = container.descriptors().next().unwrap();
        assert!(desc.type_name().unwrap().ends_with("Counter"));
    }
}
