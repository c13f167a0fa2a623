//! Startup error definitions.

use thiserror::Error;

use crate::component::ComponentId;
use crate::lifecycle::resolver::BoxError;

#[derive(Debug, Error)]
pub enum StartupError {
    /// An eager component's construction or on-ready hook failed.
    #[error("eager component {component} failed to initialize: {source}")]
    ConstructionFailed {
        component: ComponentId,
        #[source]
        source: BoxError,
    },

    /// A worker thread of the parallel sweep panicked outside of any single
    /// component's initialization.
    #[error("startup worker panicked while initializing eager components")]
    WorkerPanicked,
}

impl StartupError {
    /// The component that failed, if the error is tied to one.
    pub fn component(&self) -> Option<&ComponentId> {
        match self {
            StartupError::ConstructionFailed { component, .. } => Some(component),
            StartupError::WorkerPanicked => None,
        }
    }
}
