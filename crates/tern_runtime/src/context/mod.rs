//! Scoped registries of variables and functions.
//!
//! Contexts form a tree: a child holds a strong link to its parent and
//! parents never see their children. Lookups walk from the innermost context
//! outward, consulting each context's restriction before every step.
//!
//! # Context kinds
//!
//! - `Global`: a root, optionally chained under another root
//! - `Scope`: a block scope, labeled by a [`ScopeMarker`]
//! - `FunctionCall`: the body context of one invocation, carrying the
//!   invoked function's identity for recursion accounting

mod builder;

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tern_outcome::errors::{
    access_denied, failed_to_register_function, failed_to_set_variable, undeclared_variable,
};
use tern_outcome::Outcome;

use crate::function::Function;
use crate::options::ContextOptions;
use crate::restriction::{PermissiveRestriction, Restriction};
use crate::value::TypedValue;

pub use builder::ContextBuilder;

/// Label of a block scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeMarker(Rc<str>);

impl ScopeMarker {
    pub fn new(label: impl Into<Rc<str>>) -> Self {
        ScopeMarker(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Default for ScopeMarker {
    fn default() -> Self {
        ScopeMarker::new("block")
    }
}

/// What created a context.
#[derive(Clone, Debug)]
pub enum ContextKind {
    Global,
    Scope(ScopeMarker),
    FunctionCall(Rc<Function>),
}

/// A single scope: variables, overloaded functions, a policy and options.
///
/// Registries use interior mutability; contexts are single-threaded and no
/// borrow is held across an await point.
pub struct Context {
    kind: ContextKind,
    parent: Option<ContextRef>,
    depth: usize,
    restriction: Rc<dyn Restriction>,
    options: Rc<ContextOptions>,
    variables: RefCell<FxHashMap<Rc<str>, TypedValue>>,
    functions: RefCell<FxHashMap<Rc<str>, Vec<Rc<Function>>>>,
}

impl Context {
    fn new(
        kind: ContextKind,
        parent: Option<ContextRef>,
        restriction: Rc<dyn Restriction>,
        options: Rc<ContextOptions>,
    ) -> Self {
        let depth = parent.as_ref().map_or(0, |parent| parent.depth + 1);
        Context {
            kind,
            parent,
            depth,
            restriction,
            options,
            variables: RefCell::new(FxHashMap::default()),
            functions: RefCell::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ContextKind {
        &self.kind
    }

    #[inline]
    pub fn parent(&self) -> Option<&ContextRef> {
        self.parent.as_ref()
    }

    /// Distance from the outermost root (which is at depth 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn restriction(&self) -> &Rc<dyn Restriction> {
        &self.restriction
    }

    #[inline]
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// The function this context is the body of, if any.
    pub fn invoked_function(&self) -> Option<&Rc<Function>> {
        match &self.kind {
            ContextKind::FunctionCall(function) => Some(function),
            ContextKind::Global | ContextKind::Scope(_) => None,
        }
    }

    /// This context followed by its ancestors, innermost first.
    pub fn ancestry(&self) -> impl Iterator<Item = &Context> {
        std::iter::successors(Some(self), |context| context.parent.as_deref())
    }

    /// Number of running invocations of exactly `function` in this context
    /// and its ancestors.
    pub fn active_invocations(&self, function: &Rc<Function>) -> usize {
        self.ancestry()
            .filter(|context| {
                context
                    .invoked_function()
                    .is_some_and(|active| Rc::ptr_eq(active, function))
            })
            .count()
    }

    // Variables

    /// Read `key`, walking outward when it is not local.
    ///
    /// `Empty` when no context on the chain has the variable.
    pub fn get(&self, key: &str) -> Outcome<TypedValue> {
        if let Outcome::Failure(denial) = self.restriction.can_get_variable(self, key) {
            tracing::debug!(key, depth = self.depth, "variable read denied");
            return Outcome::Failure(
                access_denied(&format!("get variable '{key}'")).caused_by(denial),
            );
        }

        if let Some(value) = self.variables.borrow().get(key) {
            return Outcome::Success(value.clone());
        }

        let Some(parent) = &self.parent else {
            return Outcome::Empty;
        };
        if let Outcome::Failure(denial) = self.restriction.can_ask_parent_for_variable(self, key) {
            tracing::debug!(key, depth = self.depth, "parent variable lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask parent for variable '{key}'")).caused_by(denial),
            );
        }
        parent.get(key)
    }

    /// Like [`get`](Self::get), but a missing variable is an error.
    pub fn require(&self, key: &str) -> Outcome<TypedValue> {
        self.get(key)
            .switch_if_empty(|| Outcome::Failure(undeclared_variable(key)))
    }

    /// Whether `key` is readable from here.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_success()
    }

    /// Whether `key` is defined in this context itself.
    pub fn contains_local(&self, key: &str) -> bool {
        self.variables.borrow().contains_key(key)
    }

    /// Write `key`.
    ///
    /// A global write from a non-root context first goes through the parent,
    /// dropping any local binding of `key` when that succeeds. Only if the
    /// parent refuses is the variable written here, subject to this context's
    /// restriction, which sees the parent attempt.
    pub fn set(&self, key: &str, global: bool, value: TypedValue) -> Outcome<()> {
        let parent_attempt = match (&self.parent, global) {
            (Some(parent), true) => {
                let attempt = parent.set(key, true, value.clone());
                if attempt.is_success() {
                    // A local shadow would hide the new value.
                    self.variables.borrow_mut().remove(key);
                    return attempt;
                }
                Some(attempt)
            }
            _ => None,
        };

        let decision = self.restriction.can_set_variable(
            self,
            key,
            global,
            &value,
            parent_attempt.as_ref(),
        );
        if let Outcome::Failure(denial) = decision {
            tracing::debug!(key, global, depth = self.depth, "variable write denied");
            let cause = match parent_attempt {
                Some(Outcome::Failure(previous)) => denial.with_root_cause(previous),
                _ => denial,
            };
            return Outcome::Failure(failed_to_set_variable(key).caused_by(cause));
        }

        self.variables.borrow_mut().insert(Rc::from(key), value);
        Outcome::Success(())
    }

    // Functions

    /// Add an overload under the sanitized `name`.
    ///
    /// A global registration from a non-root context is delegated to the
    /// parent first and only kept locally if that fails.
    pub fn register(&self, name: &str, function: Rc<Function>, global: bool) -> Outcome<()> {
        let key = sanitize_name(name);

        let parent_attempt = match (&self.parent, global) {
            (Some(parent), true) => {
                let attempt = match self
                    .restriction
                    .can_ask_parent_to_register_function(self, &key, &function)
                {
                    Outcome::Failure(denial) => Outcome::Failure(
                        access_denied(&format!("ask parent to register function '{key}'"))
                            .caused_by(denial),
                    ),
                    Outcome::Success(_) | Outcome::Empty => {
                        parent.register(&key, Rc::clone(&function), true)
                    }
                };
                if attempt.is_success() {
                    return attempt;
                }
                Some(attempt)
            }
            _ => None,
        };

        let decision = self
            .restriction
            .can_register_function(self, &key, &function, global);
        if let Outcome::Failure(denial) = decision {
            tracing::debug!(function = %key, global, depth = self.depth, "registration denied");
            let cause = match parent_attempt {
                Some(Outcome::Failure(previous)) => denial.with_root_cause(previous),
                _ => denial,
            };
            return Outcome::Failure(failed_to_register_function(&key).caused_by(cause));
        }

        self.functions
            .borrow_mut()
            .entry(Rc::from(key))
            .or_default()
            .push(function);
        Outcome::Success(())
    }

    /// Overloads registered in this context itself, in registration order.
    pub fn local_overloads(&self, key: &str) -> Vec<Rc<Function>> {
        self.functions
            .borrow()
            .get(key)
            .map_or_else(Vec::new, Clone::clone)
    }

    pub fn has_local_function(&self, name: &str) -> bool {
        self.functions.borrow().contains_key(sanitize_name(name).as_str())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variables: Vec<_> = self
            .variables
            .borrow()
            .keys()
            .map(ToString::to_string)
            .collect();
        variables.sort();
        f.debug_struct("Context")
            .field("kind", &self.kind)
            .field("depth", &self.depth)
            .field("variables", &variables)
            .field("functions", &self.functions.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Shared handle to a [`Context`].
///
/// Operations that create child contexts or run code live here, since the
/// child keeps a strong link to its parent.
#[derive(Clone)]
#[repr(transparent)]
pub struct ContextRef(Rc<Context>);

impl ContextRef {
    fn from_context(context: Context) -> Self {
        ContextRef(Rc::new(context))
    }

    /// A root context under `restriction`, with default options.
    pub fn global(restriction: Rc<dyn Restriction>) -> Self {
        ContextBuilder::new().restriction(restriction).build()
    }

    /// A root context that allows everything.
    pub fn permissive() -> Self {
        ContextRef::global(Rc::new(PermissiveRestriction))
    }

    /// A root context, optionally chained under another root.
    pub fn root(parent: Option<&ContextRef>, restriction: Rc<dyn Restriction>) -> Self {
        let builder = ContextBuilder::new().restriction(restriction);
        match parent {
            Some(parent) => builder.parent(parent).build(),
            None => builder.build(),
        }
    }

    /// A block scope under this context, sharing its restriction.
    pub fn scope(&self, marker: ScopeMarker) -> Self {
        ContextRef::from_context(Context::new(
            ContextKind::Scope(marker),
            Some(self.clone()),
            Rc::clone(&self.restriction),
            Rc::clone(&self.options),
        ))
    }

    /// The body context of one call of `function`.
    pub fn function_call(&self, function: Rc<Function>, restriction: Rc<dyn Restriction>) -> Self {
        ContextRef::from_context(Context::new(
            ContextKind::FunctionCall(function),
            Some(self.clone()),
            restriction,
            Rc::clone(&self.options),
        ))
    }

    /// Whether both handles point to the same context.
    pub fn ptr_eq(&self, other: &ContextRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ContextRef {
    type Target = Context;

    #[inline]
    fn deref(&self) -> &Context {
        &self.0
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Normalize a function name into its registry key.
///
/// Surrounding whitespace is trimmed and every inner run of whitespace
/// becomes a single `_`.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for (i, part) in name.split_whitespace().enumerate() {
        if i > 0 {
            sanitized.push('_');
        }
        sanitized.push_str(part);
    }
    sanitized
}

#[cfg(test)]
mod tests;
