//! Resource-limiting policies.

use std::rc::Rc;

use tern_outcome::errors::{
    call_budget_exhausted, max_depth_reached, max_depth_reached_hidden, max_recursion_reached,
    max_recursion_reached_hidden,
};
use tern_outcome::Outcome;

use super::Restriction;
use crate::context::Context;
use crate::function::Function;
use crate::options::RecursionLimits;

/// Refuses calls from contexts that are too deep, or that would re-enter a
/// function too many times.
///
/// Recursion is counted per function object: the number of `FunctionCall`
/// contexts for the same function along the caller's ancestry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecursionLimiter {
    limits: RecursionLimits,
}

impl RecursionLimiter {
    pub fn new(limits: RecursionLimits) -> Self {
        RecursionLimiter { limits }
    }

    pub fn limits(&self) -> RecursionLimits {
        self.limits
    }
}

impl<R: 'static> Restriction<R> for RecursionLimiter {
    fn can_run_function(&self, context: &Context, function: &Rc<Function>) -> Outcome<R> {
        if let Some(max_depth) = self.limits.max_depth {
            let depth = context.depth();
            if depth >= max_depth {
                tracing::debug!(depth, max_depth, function = function.name(), "depth limit reached");
                return Outcome::Failure(if self.limits.hidden {
                    max_depth_reached_hidden()
                } else {
                    max_depth_reached(depth, max_depth)
                });
            }
        }

        if let Some(max_recursion) = self.limits.max_recursion {
            let active = context.active_invocations(function);
            if active >= max_recursion {
                tracing::debug!(active, max_recursion, function = function.name(), "recursion limit reached");
                return Outcome::Failure(if self.limits.hidden {
                    max_recursion_reached_hidden(function.name())
                } else {
                    max_recursion_reached(function.name(), active, max_recursion)
                });
            }
        }

        Outcome::Empty
    }
}

/// Allows a fixed number of nested calls.
///
/// Each call runs under a fresh budget one smaller than its caller's, so the
/// budget counts call nesting, not total calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallBudget {
    remaining: usize,
}

impl CallBudget {
    pub fn new(remaining: usize) -> Self {
        CallBudget { remaining }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<R: 'static> Restriction<R> for CallBudget {
    fn can_run_function(&self, _context: &Context, function: &Rc<Function>) -> Outcome<R> {
        if self.remaining == 0 {
            tracing::debug!(function = function.name(), "call budget exhausted");
            return Outcome::Failure(call_budget_exhausted(function.name()));
        }
        Outcome::Empty
    }

    fn create_subroutine_restrictions(
        &self,
        _context: &Context,
        _function: &Rc<Function>,
    ) -> Outcome<Rc<dyn Restriction<R>>> {
        Outcome::Success(Rc::new(CallBudget::new(self.remaining.saturating_sub(1))))
    }
}
