//! startup-registrar CLI
//!
//! # Commands
//! - `inspect <manifest>`: run the registration phase over a component
//!   manifest and print which components would start eagerly
//! - `run`: boot the demo container, run the startup sweep, then resolve
//!   components the way application code would
//!
//! ```text
//!   manifest / demo components
//!            │
//!            ▼
//!   ┌──────────────────┐   on_component_candidate   ┌────────────────────┐
//!   │ host / container │ ─────────────────────────▶ │ StartupRegistrar   │
//!   │                  │                            │  eager registry    │
//!   │                  │ ◀───────────────────────── │  processed registry│
//!   └──────────────────┘   resolve_and_discard      └────────────────────┘
//!            │                (registration complete)
//!            ▼
//!   application code resolves already-initialized singletons
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use startup_registrar::config::{load_config, BootConfig, ComponentManifest};
use startup_registrar::demo::{self, BandCatalog, NameLoader};
use startup_registrar::host::ContainerBuilder;
use startup_registrar::lifecycle::{StartupPlan, StartupRegistrar};
use startup_registrar::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "startup-registrar")]
#[command(about = "Eager initialization of startup singletons", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the components of a manifest without building anything
    Inspect {
        manifest: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Boot the demo components and run the startup sweep
    Run {
        /// Print a Prometheus snapshot of the startup metrics at the end
        #[arg(long)]
        print_metrics: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BootConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    let metrics_handle = if config.observability.metrics_enabled {
        match metrics::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install metrics recorder");
                None
            }
        }
    } else {
        None
    };

    tracing::info!(
        failure_policy = ?config.startup.failure_policy,
        sweep = ?config.startup.sweep,
        startup_marker = %config.startup.startup_marker,
        singleton_marker = %config.startup.singleton_marker,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Inspect { manifest, json } => {
            let manifest = ComponentManifest::load(&manifest)?;
            let mut registrar = StartupRegistrar::new(&config.startup);
            for descriptor in manifest.descriptors() {
                registrar.on_component_candidate(&descriptor);
            }

            let plan = registrar.plan();
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        Commands::Run { print_metrics } => {
            let builder = demo::register(ContainerBuilder::new(), &config.startup, &config.demo);
            let container = builder.boot(&config.startup)?;

            let report = container.startup_report();
            for failed in &report.failed {
                eprintln!("eager component {} failed: {}", failed.component, failed.error);
            }

            // Application code: the loader is already initialized
            let loader = container.select::<NameLoader>()?;
            println!("Names loaded at startup: {:?}", loader.names());

            let catalog = container.select::<BandCatalog>()?;
            println!("Bands loaded on demand: {}", catalog.bands().len());

            for descriptor in container.descriptors() {
                println!(
                    "  {:<14} constructed {} time(s)",
                    descriptor.id(),
                    container.construction_count(descriptor.id().as_str())
                );
            }

            if print_metrics {
                match &metrics_handle {
                    Some(handle) => println!("{}", handle.render()),
                    None => eprintln!("metrics are disabled in the configuration"),
                }
            }
        }
    }

    tracing::info!("Done");
    Ok(())
}

fn print_plan(plan: &StartupPlan) {
    println!(
        "Markers: startup = {}, singleton = {}",
        plan.startup_marker, plan.singleton_marker
    );
    println!("Processed components: {}", plan.processed);
    println!("Eager startup order:");
    if plan.eager.is_empty() {
        println!("  (none)");
    }
    for (position, descriptor) in plan.eager.iter().enumerate() {
        println!("  {}. {}", position + 1, descriptor);
    }
    println!("Built on demand:");
    if plan.deferred.is_empty() {
        println!("  (none)");
    }
    for id in &plan.deferred {
        println!("  - {}", id);
    }
}
