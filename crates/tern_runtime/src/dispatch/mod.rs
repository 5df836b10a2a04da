//! Function lookup, overload resolution and invocation.
//!
//! # Resolution order
//!
//! 1. The calling context must allow asking for the name at all. A denial
//!    here ends the search.
//! 2. Each overload registered locally is tried in registration order:
//!    its `can_try_function` check, then argument binding, then the call.
//! 3. If nothing succeeded, the search moves to the parent, subject to
//!    `can_ask_parent_for_function`, and repeats from step 1 there.
//! 4. The first successful call wins. Otherwise the best recorded failure is
//!    reported, or `Empty` when nothing failed.
//!
//! Whatever context the overload is found in, its body always runs in a
//! call context under the original caller.

mod binding;

use std::rc::Rc;

use tern_outcome::errors::access_denied;
use tern_outcome::{Failure, Outcome};

use crate::context::{sanitize_name, ContextRef};
use crate::function::{Argument, Arguments, Function};
use crate::value::TypedValue;

pub(crate) use binding::bind_arguments;

/// Failures seen during one resolution.
///
/// A failure raised by a called overload outranks a denial of trying one;
/// within a rank the first recorded wins.
#[derive(Default)]
struct BestFailure {
    invoked: Option<Failure>,
    denied: Option<Failure>,
}

impl BestFailure {
    fn record_invoked(&mut self, failure: Failure) {
        self.invoked.get_or_insert(failure);
    }

    fn record_denied(&mut self, failure: Failure) {
        self.denied.get_or_insert(failure);
    }

    fn into_outcome(self) -> Outcome<TypedValue> {
        self.invoked
            .or(self.denied)
            .map_or(Outcome::Empty, Outcome::Failure)
    }
}

impl ContextRef {
    /// Call `name` with arguments given as `(name, value)` pairs.
    pub async fn invoke<'n, I>(&self, name: &str, arguments: I) -> Outcome<TypedValue>
    where
        I: IntoIterator<Item = (Option<&'n str>, TypedValue)>,
    {
        let arguments: Vec<Argument> = arguments
            .into_iter()
            .map(|(name, value)| match name {
                Some(name) => Argument::named(name, value),
                None => Argument::positional(value),
            })
            .collect();
        self.invoke_function(name, &arguments).await
    }

    /// Resolve `name` from this context and call it here.
    pub async fn invoke_function(&self, name: &str, arguments: &[Argument]) -> Outcome<TypedValue> {
        self.invoke_function_with_self(name, arguments, self).await
    }

    /// Resolve `name` starting at this context; run the chosen overload under
    /// `self_context`.
    #[tracing::instrument(level = "debug", skip_all, fields(name))]
    pub async fn invoke_function_with_self(
        &self,
        name: &str,
        arguments: &[Argument],
        self_context: &ContextRef,
    ) -> Outcome<TypedValue> {
        let key = sanitize_name(name);
        if let Outcome::Failure(denial) = self.restriction().can_ask_for_function(self, &key) {
            tracing::debug!(function = %key, "function lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask for function '{key}'")).caused_by(denial),
            );
        }

        let mut best = BestFailure::default();
        let mut scope = self.clone();
        loop {
            for function in scope.local_overloads(&key) {
                if let Outcome::Failure(denial) =
                    scope.restriction().can_try_function(&scope, &key, &function)
                {
                    tracing::debug!(function = %function, "overload denied");
                    best.record_denied(
                        access_denied(&format!("try function '{function}'")).caused_by(denial),
                    );
                    continue;
                }

                let Some(bound) = bind_arguments(&function, arguments) else {
                    tracing::trace!(function = %function, "arguments do not match");
                    continue;
                };

                tracing::trace!(function = %function, depth = scope.depth(), "invoking overload");
                match self_context.invoke_function_object(&function, bound).await {
                    Outcome::Success(value) => return Outcome::Success(value),
                    Outcome::Empty => {}
                    Outcome::Failure(failure) => best.record_invoked(failure),
                }
            }

            let Some(parent) = scope.parent().cloned() else {
                break;
            };
            if let Outcome::Failure(denial) =
                scope.restriction().can_ask_parent_for_function(&scope, &key)
            {
                tracing::debug!(function = %key, depth = scope.depth(), "parent function lookup denied");
                best.record_denied(
                    access_denied(&format!("ask parent for function '{key}'")).caused_by(denial),
                );
                break;
            }
            if let Outcome::Failure(denial) = parent.restriction().can_ask_for_function(&parent, &key)
            {
                tracing::debug!(function = %key, depth = parent.depth(), "function lookup denied");
                best.record_denied(
                    access_denied(&format!("ask for function '{key}'")).caused_by(denial),
                );
                break;
            }
            scope = parent;
        }

        best.into_outcome()
    }

    /// Run `function` with already bound arguments, from this context.
    ///
    /// The caller's restriction decides whether the call may run and which
    /// policy the body runs under. The body gets a fresh call context.
    pub async fn invoke_function_object(
        &self,
        function: &Rc<Function>,
        arguments: Arguments,
    ) -> Outcome<TypedValue> {
        if let Outcome::Failure(denial) = self.restriction().can_run_function(self, function) {
            tracing::debug!(function = %function, depth = self.depth(), "call refused");
            return Outcome::Failure(denial);
        }

        let restriction = match self
            .restriction()
            .create_subroutine_restrictions(self, function)
        {
            Outcome::Success(derived) => derived,
            Outcome::Empty => Rc::clone(self.restriction()),
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        };

        let call_context = self.function_call(Rc::clone(function), restriction);
        function.call(&call_context, arguments).await
    }
}
