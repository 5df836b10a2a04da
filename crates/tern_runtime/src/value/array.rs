use std::fmt;
use std::rc::Rc;

use tern_outcome::Outcome;

use super::{EvaluationKind, TypedValue};
use crate::context::ContextRef;

/// How an array's contents relate to evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stability {
    /// Every element is fixed.
    Stable,
    /// Some element may need evaluation.
    Unsure,
    /// Always re-evaluated, whatever the elements are.
    Runtime,
}

impl Stability {
    fn classify(items: &[TypedValue]) -> Self {
        if items
            .iter()
            .all(|item| item.evaluation_kind() == EvaluationKind::Fixed)
        {
            Stability::Stable
        } else {
            Stability::Unsure
        }
    }

    pub fn evaluation_kind(self) -> EvaluationKind {
        match self {
            Stability::Stable => EvaluationKind::Fixed,
            Stability::Unsure => EvaluationKind::Unsure,
            Stability::Runtime => EvaluationKind::Runtime,
        }
    }
}

/// An immutable, cheaply clonable sequence of values.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    items: Rc<[TypedValue]>,
    stability: Stability,
}

impl ArrayValue {
    /// `Stable` when every element is fixed, `Unsure` otherwise.
    pub fn new(items: Vec<TypedValue>) -> Self {
        let stability = Stability::classify(&items);
        ArrayValue {
            items: items.into(),
            stability,
        }
    }

    /// An array that is evaluated on every use.
    pub fn runtime(items: Vec<TypedValue>) -> Self {
        ArrayValue {
            items: items.into(),
            stability: Stability::Runtime,
        }
    }

    #[inline]
    pub fn items(&self) -> &[TypedValue] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn stability(&self) -> Stability {
        self.stability
    }

    /// Evaluate every element and rebuild.
    ///
    /// An element that evaluates to `Empty` becomes `Undefined`; the first
    /// element failure aborts the whole array.
    pub(crate) async fn evaluate(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let mut evaluated = Vec::with_capacity(self.items.len());
        for item in self.items.iter() {
            match item.resolve(context).await {
                Outcome::Success(value) => evaluated.push(value),
                Outcome::Empty => evaluated.push(TypedValue::Undefined),
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            }
        }
        Outcome::Success(TypedValue::Array(ArrayValue::new(evaluated)))
    }
}

impl From<Vec<TypedValue>> for ArrayValue {
    fn from(items: Vec<TypedValue>) -> Self {
        ArrayValue::new(items)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
