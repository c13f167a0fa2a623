//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a boot.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::component::selector::{DEFAULT_SINGLETON_MARKER, DEFAULT_STARTUP_MARKER};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootConfig {
    /// Startup sweep settings.
    pub startup: StartupConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Demo component settings (used by the `run` command).
    pub demo: DemoConfig,
}

/// What the sweep does when an eager component fails to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort on the first failure and propagate it to the host.
    ///
    /// With the parallel sweep, components registered after the failing one
    /// may already be in flight on other workers; those still finish. No new
    /// component is started once the failure is seen.
    #[default]
    FailFast,
    /// Log each failure and keep initializing the remaining components.
    BestEffort,
}

/// How eager components are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SweepMode {
    /// One at a time, in registration order.
    #[default]
    Sequential,
    /// Worker threads pulling components in registration order.
    Parallel,
}

/// Startup sweep configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Failure policy for the sweep.
    pub failure_policy: FailurePolicy,

    /// Sequential or parallel construction.
    pub sweep: SweepMode,

    /// Worker threads for the parallel sweep.
    pub max_parallelism: usize,

    /// Marker requesting eager construction.
    pub startup_marker: String,

    /// Marker declaring an application-wide singleton.
    pub singleton_marker: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            sweep: SweepMode::Sequential,
            max_parallelism: 4,
            startup_marker: DEFAULT_STARTUP_MARKER.to_string(),
            singleton_marker: DEFAULT_SINGLETON_MARKER.to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. "info" or "startup_registrar=debug").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Install the in-process metrics recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

/// Demo component configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated warm-up time of the name loader's on-ready hook.
    pub warmup_ms: u64,

    /// How many names the loader keeps.
    pub name_count: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            warmup_ms: 0,
            name_count: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: BootConfig = toml::from_str("").unwrap();
        assert_eq!(config.startup.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.startup.sweep, SweepMode::Sequential);
        assert_eq!(config.startup.startup_marker, "StartUp");
        assert_eq!(config.startup.singleton_marker, "ApplicationScoped");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_override() {
        let config: BootConfig = toml::from_str(
            r#"
            [startup]
            failure_policy = "best-effort"
            sweep = "parallel"
            startup_marker = "Eager"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.startup.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.startup.sweep, SweepMode::Parallel);
        assert_eq!(config.startup.startup_marker, "Eager");
        // untouched fields keep their defaults
        assert_eq!(config.startup.singleton_marker, "ApplicationScoped");
        assert_eq!(config.startup.max_parallelism, 4);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
