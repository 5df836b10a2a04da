//! Capability policy.
//!
//! Every context consults its [`Restriction`] before reading or writing a
//! variable, registering or resolving a function, running a body, or walking
//! to its parent. Each check answers with an [`Outcome`]:
//!
//! - `Success(token)`: explicitly allowed
//! - `Empty`: no opinion, which callers treat as allowed
//! - `Failure`: denied, with the reason in the failure
//!
//! Policies compose through [`CompoundRestriction`]. When a function is
//! invoked, [`Restriction::create_subroutine_restrictions`] derives the
//! policy attached to the new call context; policies are never mutated.

mod compound;
mod deny_list;
mod limits;

use std::rc::Rc;

use tern_outcome::Outcome;

use crate::context::Context;
use crate::function::Function;
use crate::types::TypeInfo;
use crate::value::TypedValue;

pub use compound::{CompoundRestriction, EmptyResultFinisher, StartingValue};
pub use deny_list::FunctionDenyList;
pub use limits::{CallBudget, RecursionLimiter};

/// Default permission token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grant;

/// Policy consulted by a [`Context`] before each operation.
///
/// Every check defaults to `Empty`, so an implementation only overrides the
/// operations it has an opinion on.
pub trait Restriction<R: 'static = Grant> {
    fn can_get_variable(&self, _context: &Context, _key: &str) -> Outcome<R> {
        Outcome::Empty
    }

    /// `parent_attempt` is the outcome of writing through the parent first,
    /// present only for global writes from a non-root context.
    fn can_set_variable(
        &self,
        _context: &Context,
        _key: &str,
        _global: bool,
        _value: &TypedValue,
        _parent_attempt: Option<&Outcome<()>>,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_parent_for_variable(&self, _context: &Context, _key: &str) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_register_function(
        &self,
        _context: &Context,
        _name: &str,
        _function: &Function,
        _global: bool,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_parent_to_register_function(
        &self,
        _context: &Context,
        _name: &str,
        _function: &Function,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_for_function(&self, _context: &Context, _name: &str) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_parent_for_function(&self, _context: &Context, _name: &str) -> Outcome<R> {
        Outcome::Empty
    }

    /// Per overload, before argument matching.
    fn can_try_function(&self, _context: &Context, _name: &str, _function: &Function) -> Outcome<R> {
        Outcome::Empty
    }

    /// Checked against the calling context right before the body runs.
    fn can_run_function(&self, _context: &Context, _function: &Rc<Function>) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_for_member_function(
        &self,
        _context: &Context,
        _receiver: &TypeInfo,
        _name: &str,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_for_property_getter(
        &self,
        _context: &Context,
        _receiver: &TypeInfo,
        _name: &str,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_for_operator(&self, _context: &Context, _left: &TypeInfo, _operator: &str) -> Outcome<R> {
        Outcome::Empty
    }

    fn can_ask_for_casting_operator(
        &self,
        _context: &Context,
        _from: &TypeInfo,
        _to: &TypeInfo,
    ) -> Outcome<R> {
        Outcome::Empty
    }

    /// The policy for a call of `function` from `context`.
    ///
    /// `Empty` keeps the current policy. A `Failure` aborts the call.
    fn create_subroutine_restrictions(
        &self,
        _context: &Context,
        _function: &Rc<Function>,
    ) -> Outcome<Rc<dyn Restriction<R>>> {
        Outcome::Empty
    }
}

/// Allows everything by never having an opinion.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveRestriction;

impl<R: 'static> Restriction<R> for PermissiveRestriction {}
