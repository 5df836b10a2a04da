//! Statements.
//!
//! Script function bodies are [`Block`]s: ordered [`Action`]s run in a fresh
//! scope. A block's value is the value of its last `Evaluate` action, or
//! `Undefined` if it has none.

use std::fmt;
use std::rc::Rc;

use tern_outcome::Outcome;

use crate::context::{ContextRef, ScopeMarker};
use crate::function::Function;
use crate::value::TypedValue;
use crate::LocalBoxFuture;

/// A single statement.
#[derive(Clone, Debug)]
pub enum Action {
    /// Evaluate `value` and store it under `key`.
    Assign {
        key: Rc<str>,
        global: bool,
        value: TypedValue,
    },
    /// Register `function` under `name`.
    Declare {
        name: Rc<str>,
        function: Rc<Function>,
        global: bool,
    },
    /// Evaluate a value; the last one is the block's result.
    Evaluate(TypedValue),
    /// A nested block with its own scope.
    Block(Block),
}

impl Action {
    pub fn assign(key: impl Into<Rc<str>>, value: TypedValue) -> Self {
        Action::Assign {
            key: key.into(),
            global: false,
            value,
        }
    }

    pub fn assign_global(key: impl Into<Rc<str>>, value: TypedValue) -> Self {
        Action::Assign {
            key: key.into(),
            global: true,
            value,
        }
    }

    pub fn declare(name: impl Into<Rc<str>>, function: Rc<Function>) -> Self {
        Action::Declare {
            name: name.into(),
            function,
            global: false,
        }
    }

    /// Run in `context`.
    ///
    /// `Assign` and `Declare` yield `Success(Undefined)` once done. An `Empty`
    /// evaluation is stored and reported as `Undefined`.
    pub fn run<'a>(&'a self, context: &'a ContextRef) -> LocalBoxFuture<'a, Outcome<TypedValue>> {
        Box::pin(async move {
            match self {
                Action::Assign { key, global, value } => {
                    let value = match value.resolve(context).await {
                        Outcome::Success(value) => value,
                        Outcome::Empty => TypedValue::Undefined,
                        Outcome::Failure(failure) => return Outcome::Failure(failure),
                    };
                    context
                        .set(key, *global, value)
                        .map(|()| TypedValue::Undefined)
                }
                Action::Declare {
                    name,
                    function,
                    global,
                } => context
                    .register(name, Rc::clone(function), *global)
                    .map(|()| TypedValue::Undefined),
                Action::Evaluate(value) => value
                    .resolve(context)
                    .await
                    .or_else_empty(|| TypedValue::Undefined),
                Action::Block(block) => block.run(context).await,
            }
        })
    }
}

/// An ordered list of actions sharing one scope.
#[derive(Clone, Debug)]
pub struct Block {
    marker: ScopeMarker,
    actions: Rc<[Action]>,
}

impl Block {
    pub fn new(marker: ScopeMarker, actions: Vec<Action>) -> Self {
        Block {
            marker,
            actions: actions.into(),
        }
    }

    pub fn marker(&self) -> &ScopeMarker {
        &self.marker
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Run in a new scope under `context`.
    pub async fn run(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let scope = context.scope(self.marker.clone());
        self.run_in(&scope).await
    }

    /// Run directly in `context`, without opening a scope.
    ///
    /// The first failing action aborts the block.
    pub(crate) async fn run_in(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let mut result = TypedValue::Undefined;
        for action in self.actions.iter() {
            match action.run(context).await {
                Outcome::Success(value) => {
                    if matches!(action, Action::Evaluate(_)) {
                        result = value;
                    }
                }
                Outcome::Empty => {}
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            }
        }
        Outcome::Success(result)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ {} actions }}", self.marker.label(), self.actions.len())
    }
}

#[cfg(test)]
mod tests;
