//! # Start failures keyed by component identity.
//!
//! [`StartFailures`] is what the orchestrator returns: one entry per component
//! whose start failed, nothing for components that started. Keys are the
//! address of the shared allocation behind a [`ComponentRef`], so two distinct
//! components with identical contents never collide and the component type
//! needs no `Eq`/`Hash`.
//!
//! The map keeps the failed handles alive, so an address cannot be reused by
//! another component while the map exists.

use std::collections::HashMap;
use std::sync::Arc;

use super::ComponentRef;
use crate::error::StartError;

/// Identity of a component: the data address of its `Arc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ComponentKey(usize);

impl ComponentKey {
    fn of(component: &ComponentRef) -> Self {
        Self(Arc::as_ptr(component).cast::<()>() as usize)
    }
}

/// Failed component and the error its start produced.
struct Failure {
    component: ComponentRef,
    error: StartError,
}

/// Failure-only report of a group start.
///
/// `is_empty()` means every component started.
#[derive(Default)]
pub struct StartFailures {
    inner: HashMap<ComponentKey, Failure>,
}

impl StartFailures {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `component`, replacing an earlier entry for the same component.
    pub(crate) fn insert(&mut self, component: ComponentRef, error: StartError) {
        self.inner
            .insert(ComponentKey::of(&component), Failure { component, error });
    }

    /// The error `component` failed with, if it failed.
    pub fn get(&self, component: &ComponentRef) -> Option<&StartError> {
        self.inner
            .get(&ComponentKey::of(component))
            .map(|f| &f.error)
    }

    /// `true` if `component` failed to start.
    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.inner.contains_key(&ComponentKey::of(component))
    }

    /// Number of failed components.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if every component started.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(component, error)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentRef, &StartError)> {
        self.inner.values().map(|f| (&f.component, &f.error))
    }

    /// The failed components, in no particular order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentRef> {
        self.inner.values().map(|f| &f.component)
    }

    /// Consumes the report, returning `(component, error)` pairs.
    pub fn into_errors(self) -> Vec<(ComponentRef, StartError)> {
        self.inner
            .into_values()
            .map(|f| (f.component, f.error))
            .collect()
    }
}

impl std::fmt::Debug for StartFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(c, e)| (c.name(), e)))
            .finish()
    }
}
