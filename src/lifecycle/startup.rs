//! Startup orchestration.
//!
//! # Responsibilities
//! - Observe every candidate component during the registration phase
//! - Record components marked for eager startup that are application singletons
//! - Force construction of those components once registration is complete
//!
//! # Design Decisions
//! - Fail fast by default: an eager component that cannot start aborts the boot
//! - Components initialize in registration order unless the parallel sweep is configured
//! - The sweep consumes the registrar, so registration cannot reopen afterwards

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::component::{ComponentDescriptor, ComponentId, EagerSelector};
use crate::config::{FailurePolicy, StartupConfig, SweepMode};
use crate::lifecycle::error::StartupError;
use crate::lifecycle::registry::{EagerStartRegistry, ProcessedRegistry};
use crate::lifecycle::report::{FailedComponent, InitializedComponent, StartupPlan, StartupReport};
use crate::lifecycle::resolver::{BoxError, Resolver};
use crate::observability::metrics;

/// Two-phase lifecycle observer that eagerly initializes startup singletons.
///
/// The host calls [`on_component_candidate`](Self::on_component_candidate) once
/// per discovered component, then [`on_registration_complete`](Self::on_registration_complete)
/// exactly once before application code runs.
#[derive(Debug)]
pub struct StartupRegistrar {
    selector: EagerSelector,
    policy: FailurePolicy,
    sweep: SweepMode,
    max_parallelism: usize,
    eager: EagerStartRegistry,
    processed: ProcessedRegistry,
}

impl StartupRegistrar {
    /// Create a registrar with empty registries.
    pub fn new(config: &StartupConfig) -> Self {
        Self {
            selector: EagerSelector::from_config(config),
            policy: config.failure_policy,
            sweep: config.sweep,
            max_parallelism: config.max_parallelism.max(1),
            eager: EagerStartRegistry::new(),
            processed: ProcessedRegistry::new(),
        }
    }

    pub(crate) fn from_registries(
        config: &StartupConfig,
        eager: EagerStartRegistry,
        processed: ProcessedRegistry,
    ) -> Self {
        Self {
            eager,
            processed,
            ..Self::new(config)
        }
    }

    /// Registration phase callback. Metadata only: never constructs anything.
    pub fn on_component_candidate(&mut self, descriptor: &ComponentDescriptor) {
        let id = descriptor.id();
        let eager = self.selector.is_eager(descriptor);

        if eager {
            if self.eager.insert(descriptor) {
                tracing::info!(component = %descriptor, "New eager startup component found");
            } else {
                tracing::debug!(component = %id, "Eager component offered again, ignoring");
            }
        } else if self.selector.wants_startup(descriptor) {
            tracing::debug!(
                component = %id,
                singleton_marker = %self.selector.singleton_marker(),
                "Startup marker without singleton scope, component stays lazy"
            );
        }

        if self.processed.insert(id) {
            metrics::record_candidate(eager);
        }
    }

    /// Eager components in the order they will be initialized.
    pub fn eager_components(&self) -> impl ExactSizeIterator<Item = &ComponentDescriptor> {
        self.eager.iter()
    }

    pub fn is_eager(&self, id: &str) -> bool {
        self.eager.contains(id)
    }

    pub fn eager_count(&self) -> usize {
        self.eager.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn plan(&self) -> StartupPlan {
        StartupPlan {
            startup_marker: self.selector.startup_marker().to_string(),
            singleton_marker: self.selector.singleton_marker().to_string(),
            eager: self.eager.iter().cloned().collect(),
            deferred: self
                .processed
                .iter()
                .filter(|id| !self.eager.contains(id.as_str()))
                .cloned()
                .collect(),
            processed: self.processed.len(),
        }
    }

    /// Registration complete callback: initialize every eager component.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failure is returned and no
    /// later component is started. Under [`FailurePolicy::BestEffort`] failures
    /// are logged, collected in the report, and the sweep runs to completion.
    pub fn on_registration_complete<R>(self, resolver: &R) -> Result<StartupReport, StartupError>
    where
        R: Resolver + Sync + ?Sized,
    {
        tracing::info!(
            eager = self.eager.len(),
            processed = self.processed.len(),
            policy = ?self.policy,
            sweep = ?self.sweep,
            "Registration complete, initializing eager components"
        );

        let start = Instant::now();
        let outcomes = match self.sweep {
            SweepMode::Sequential => self.sweep_sequential(resolver),
            SweepMode::Parallel => self.sweep_parallel(resolver)?,
        };

        let mut report = StartupReport {
            processed: self.processed.len(),
            ..StartupReport::default()
        };

        for (component, elapsed, result) in outcomes {
            match result {
                Ok(()) => report.initialized.push(InitializedComponent { component, elapsed }),
                Err(source) => match self.policy {
                    FailurePolicy::FailFast => {
                        tracing::error!(
                            component = %component,
                            error = %source,
                            "Eager component failed, aborting startup"
                        );
                        metrics::record_sweep(start.elapsed(), report.initialized.len(), 1);
                        return Err(StartupError::ConstructionFailed { component, source });
                    }
                    FailurePolicy::BestEffort => {
                        report.failed.push(FailedComponent {
                            component,
                            error: source.to_string(),
                        });
                    }
                },
            }
        }

        report.elapsed = start.elapsed();
        metrics::record_sweep(report.elapsed, report.initialized.len(), report.failed.len());

        tracing::info!(
            initialized = report.initialized.len(),
            failed = report.failed.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Eager startup sweep finished"
        );
        Ok(report)
    }

    fn sweep_sequential<R>(&self, resolver: &R) -> Vec<Outcome>
    where
        R: Resolver + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(self.eager.len());
        for descriptor in self.eager.iter() {
            let outcome = initialize(resolver, descriptor);
            let failed = outcome.2.is_err();
            outcomes.push(outcome);
            if failed && self.policy == FailurePolicy::FailFast {
                break;
            }
        }
        outcomes
    }

    /// Workers pull components in registration order. Once a failure is seen
    /// under fail-fast no new component is started, but components already in
    /// flight on other workers finish. A panic inside one component is
    /// reported as that component's failure.
    fn sweep_parallel<R>(&self, resolver: &R) -> Result<Vec<Outcome>, StartupError>
    where
        R: Resolver + Sync + ?Sized,
    {
        let total = self.eager.len();
        let workers = self.max_parallelism.min(total);
        if workers <= 1 {
            return Ok(self.sweep_sequential(resolver));
        }

        let cursor = &AtomicUsize::new(0);
        let abort = &AtomicBool::new(false);
        let fail_fast = self.policy == FailurePolicy::FailFast;
        let registry = &self.eager;

        let joined: Vec<thread::Result<Vec<(usize, Outcome)>>> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for _ in 0..workers {
                handles.push(scope.spawn(move || {
                    let mut done = Vec::new();
                    while !abort.load(Ordering::Acquire) {
                        let index = cursor.fetch_add(1, Ordering::AcqRel);
                        let Some(descriptor) = registry.get_index(index) else {
                            break;
                        };
                        let outcome = initialize_isolated(resolver, descriptor);
                        if fail_fast && outcome.2.is_err() {
                            abort.store(true, Ordering::Release);
                        }
                        done.push((index, outcome));
                    }
                    done
                }));
            }
            handles.into_iter().map(|handle| handle.join()).collect()
        });

        let mut indexed = Vec::with_capacity(total);
        for worker in joined {
            indexed.extend(worker.map_err(|_| StartupError::WorkerPanicked)?);
        }
        indexed.sort_by_key(|(index, _)| *index);

        Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }
}

type Outcome = (ComponentId, Duration, Result<(), BoxError>);

fn initialize<R>(resolver: &R, descriptor: &ComponentDescriptor) -> Outcome
where
    R: Resolver + ?Sized,
{
    let id = descriptor.id();
    let start = Instant::now();
    let result = resolver.resolve_and_discard(descriptor);
    let elapsed = start.elapsed();

    match &result {
        Ok(()) => {
            tracing::info!(
                component = %id,
                elapsed_ms = elapsed.as_millis() as u64,
                "Eager component initialized"
            );
            metrics::record_initialized(id, elapsed);
        }
        Err(e) => {
            tracing::warn!(component = %id, error = %e, "Eager component failed to initialize");
            metrics::record_failure(id);
        }
    }

    (id.clone(), elapsed, result)
}

/// Like [`initialize`], but a panicking resolver becomes a failure of that
/// component instead of taking the worker (and its finished outcomes) down.
fn initialize_isolated<R>(resolver: &R, descriptor: &ComponentDescriptor) -> Outcome
where
    R: Resolver + ?Sized,
{
    let start = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(|| initialize(resolver, descriptor))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let id = descriptor.id();
            let message = panic_message(payload.as_ref());
            tracing::error!(
                component = %id,
                panic = %message,
                "Eager component panicked during initialization"
            );
            metrics::record_failure(id);
            (id.clone(), start.elapsed(), Err(format!("panicked: {message}").into()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
