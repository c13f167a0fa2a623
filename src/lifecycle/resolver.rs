//! The seam between the registrar and the host runtime.

use crate::component::ComponentDescriptor;

/// Boxed error returned by host runtimes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Host facility that can produce a fully initialized component.
pub trait Resolver {
    /// Construct the component (running its on-ready hook) and drop the
    /// handle. Triggering initialization is the only purpose of this call.
    fn resolve_and_discard(&self, descriptor: &ComponentDescriptor) -> Result<(), BoxError>;
}

impl<F> Resolver for F
where
    F: Fn(&ComponentDescriptor) -> Result<(), BoxError>,
{
    fn resolve_and_discard(&self, descriptor: &ComponentDescriptor) -> Result<(), BoxError> {
        self(descriptor)
    }
}
