//! The three-state outcome type.

use crate::Failure;

/// Result of every runtime operation.
///
/// - `Success`: a value was produced (or a decision was adopted)
/// - `Empty`: the operation declined to produce an opinion, or found nothing
/// - `Failure`: denied or errored, with a traceable cause chain
///
/// `Empty` is a distinguished state, not an error: lookups that miss and
/// restrictions that abstain both report it, leaving the caller free to try
/// an alternative with [`Outcome::switch_if_empty`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Empty,
    Failure(Failure),
}

impl<T> Outcome<T> {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The produced value, discarding `Empty` and `Failure`.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Empty | Outcome::Failure(_) => None,
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Empty | Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failure(failure) => Some(failure),
            Outcome::Success(_) | Outcome::Empty => None,
        }
    }

    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Outcome::Failure(failure) => Some(failure),
            Outcome::Success(_) | Outcome::Empty => None,
        }
    }

    /// `Some` becomes `Success`, `None` becomes `Empty`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Success(value),
            None => Outcome::Empty,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(failure) => Outcome::Failure(failure.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Chain another operation on `Success`.
    pub fn flat_map<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Try an alternative only when this outcome is `Empty`.
    pub fn switch_if_empty(self, f: impl FnOnce() -> Outcome<T>) -> Outcome<T> {
        match self {
            Outcome::Empty => f(),
            other => other,
        }
    }

    /// Replace `Empty` with a produced value.
    pub fn or_else_empty(self, f: impl FnOnce() -> T) -> Outcome<T> {
        match self {
            Outcome::Empty => Outcome::Success(f()),
            other => other,
        }
    }

    /// Try an alternative only when this outcome is a `Failure`.
    pub fn switch_if_failure(self, f: impl FnOnce(Failure) -> Outcome<T>) -> Outcome<T> {
        match self {
            Outcome::Failure(failure) => f(failure),
            other => other,
        }
    }

    pub fn map_failure(self, f: impl FnOnce(Failure) -> Failure) -> Outcome<T> {
        match self {
            Outcome::Failure(failure) => Outcome::Failure(f(failure)),
            other => other,
        }
    }

    /// Keep the state, drop the value.
    pub fn discard(self) -> Outcome<()> {
        self.map(|_| ())
    }

    /// Convert into a `Result` so callers can use `?`.
    ///
    /// `Empty` maps to `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, Failure> {
        match self {
            Outcome::Success(value) => Ok(Some(value)),
            Outcome::Empty => Ok(None),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::Empty
    }
}

impl<T> From<Result<T, Failure>> for Outcome<T> {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(failure) => Outcome::Failure(failure),
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        Outcome::from_option(value)
    }
}
