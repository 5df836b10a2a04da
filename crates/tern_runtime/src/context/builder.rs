//! `ContextBuilder` for creating root contexts.

use std::rc::Rc;

use super::{Context, ContextKind, ContextRef};
use crate::options::{ContextOptions, RecursionLimits};
use crate::restriction::{PermissiveRestriction, RecursionLimiter, Restriction};

/// Builder for root (`Global`) contexts.
///
/// Anything left unset is inherited from the parent when there is one:
/// - restriction: the parent's, or [`PermissiveRestriction`]
/// - options: the parent's, or [`ContextOptions::default`]
#[derive(Default)]
pub struct ContextBuilder {
    parent: Option<ContextRef>,
    restriction: Option<Rc<dyn Restriction>>,
    options: Option<ContextOptions>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain the new root under `parent`.
    #[must_use]
    pub fn parent(mut self, parent: &ContextRef) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    #[must_use]
    pub fn restriction(mut self, restriction: Rc<dyn Restriction>) -> Self {
        self.restriction = Some(restriction);
        self
    }

    /// Guard the context with a [`RecursionLimiter`].
    #[must_use]
    pub fn recursion_limits(self, limits: RecursionLimits) -> Self {
        self.restriction(Rc::new(RecursionLimiter::new(limits)))
    }

    #[must_use]
    pub fn options(mut self, options: ContextOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> ContextRef {
        let restriction = self.restriction.unwrap_or_else(|| match &self.parent {
            Some(parent) => Rc::clone(parent.restriction()),
            None => Rc::new(PermissiveRestriction),
        });
        let options = match (self.options, &self.parent) {
            (Some(options), _) => Rc::new(options),
            (None, Some(parent)) => Rc::clone(&parent.options),
            (None, None) => Rc::new(ContextOptions::default()),
        };
        ContextRef::from_context(Context::new(
            ContextKind::Global,
            self.parent,
            restriction,
            options,
        ))
    }
}
