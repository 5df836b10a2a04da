//! Binary operator chains.
//!
//! An [`Expression`] is a start value followed by `(operator, operand)`
//! pairs, exactly as written. Evaluation reduces the chain one precedence
//! tier at a time, highest binding first, folding left within a tier:
//!
//! ```text
//! 2 + 3 * 4   =>  * tier: 2 + 12   =>  + tier: 14
//! 2 ^ 3 ^ 2   =>  ^ tier: (2 ^ 3) ^ 2 = 64
//! ```
//!
//! Each application goes through the operator protocol
//! (`MemberOperator_<Type>_<op>`). An application that fails or finds no
//! operator produces `Undefined` and the chain carries on.

mod operator;

use std::fmt;

use tern_outcome::Outcome;

use crate::context::ContextRef;
use crate::value::TypedValue;

pub use operator::{Operator, Tier};

/// `start op1 v1 op2 v2 ...`, unreduced.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    start: TypedValue,
    operations: Vec<(Operator, TypedValue)>,
}

impl Expression {
    pub fn new(start: TypedValue, operations: Vec<(Operator, TypedValue)>) -> Self {
        Expression { start, operations }
    }

    /// Start a chain at `start`.
    pub fn start(start: TypedValue) -> Self {
        Expression::new(start, Vec::new())
    }

    /// Append `operator operand`.
    #[must_use]
    pub fn then(mut self, operator: Operator, operand: TypedValue) -> Self {
        self.operations.push((operator, operand));
        self
    }

    pub fn start_value(&self) -> &TypedValue {
        &self.start
    }

    pub fn operations(&self) -> &[(Operator, TypedValue)] {
        &self.operations
    }

    /// Evaluate operands left to right, then reduce tier by tier.
    ///
    /// Operand failures propagate; operator failures do not.
    #[tracing::instrument(level = "trace", skip_all, fields(operations = self.operations.len()))]
    pub(crate) async fn evaluate(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let mut accumulator = match self.start.resolve(context).await {
            Outcome::Success(value) => value,
            Outcome::Empty => TypedValue::Undefined,
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        };

        let mut pending = Vec::with_capacity(self.operations.len());
        for (operator, operand) in &self.operations {
            let operand = match operand.resolve(context).await {
                Outcome::Success(value) => value,
                Outcome::Empty => TypedValue::Undefined,
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            };
            pending.push((*operator, operand));
        }

        for tier in Tier::ALL {
            if pending.is_empty() {
                break;
            }
            (accumulator, pending) = reduce_tier(context, tier, accumulator, pending).await;
        }
        Outcome::Success(accumulator)
    }
}

/// One left-to-right pass applying only `tier`'s operators.
///
/// An operator of the tier combines with the nearest value on its left: the
/// operand of the last carried pair if there is one, else the accumulator.
/// Operators of other tiers are carried over unchanged.
async fn reduce_tier(
    context: &ContextRef,
    tier: Tier,
    mut accumulator: TypedValue,
    pending: Vec<(Operator, TypedValue)>,
) -> (TypedValue, Vec<(Operator, TypedValue)>) {
    let mut carried: Vec<(Operator, TypedValue)> = Vec::with_capacity(pending.len());
    for (operator, operand) in pending {
        if operator.tier() != tier {
            carried.push((operator, operand));
            continue;
        }
        match carried.pop() {
            Some((previous_operator, previous)) => {
                let combined = apply(context, &previous, operator, &operand).await;
                carried.push((previous_operator, combined));
            }
            None => {
                accumulator = apply(context, &accumulator, operator, &operand).await;
            }
        }
    }
    (accumulator, carried)
}

async fn apply(
    context: &ContextRef,
    left: &TypedValue,
    operator: Operator,
    right: &TypedValue,
) -> TypedValue {
    match context
        .invoke_binary_operator(left, operator.symbol(), right)
        .await
    {
        Outcome::Success(value) => value,
        Outcome::Empty => {
            tracing::debug!(%operator, left = %left.type_info(), "no operator found");
            TypedValue::Undefined
        }
        Outcome::Failure(failure) => {
            tracing::debug!(%operator, %failure, "operator failed");
            TypedValue::Undefined
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.start)?;
        for (operator, operand) in &self.operations {
            write!(f, " {operator} {operand}")?;
        }
        write!(f, ")")
    }
}
