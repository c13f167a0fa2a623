//! Host resolution errors.

use thiserror::Error;

use crate::component::ComponentId;
use crate::lifecycle::BoxError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no component registered as {0}")]
    UnknownComponent(ComponentId),

    #[error("no component of type {0} is registered")]
    UnknownType(&'static str),

    #[error("component {component} is not a {expected}")]
    TypeMismatch {
        component: ComponentId,
        expected: &'static str,
    },

    #[error("component {component} failed to construct: {source}")]
    Construction {
        component: ComponentId,
        #[source]
        source: BoxError,
    },

    #[error("instance slot of {0} is poisoned by an earlier panic")]
    Poisoned(ComponentId),
}
