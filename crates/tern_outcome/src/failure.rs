//! Coded failures with a cause chain.

use crate::ErrorCode;
use thiserror::Error;

/// A denial or error, optionally caused by an earlier failure.
///
/// The cause chain is how a rejection stays traceable: a failed `set` carries
/// the restriction decision that rejected it, which in turn may carry the
/// parent scope's attempt that preceded it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct Failure {
    /// Numeric category of the failure.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// The failure that led to this one, if any.
    #[source]
    pub cause: Option<Box<Failure>>,
}

impl Failure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Set `cause` as the direct cause, replacing any previous one.
    #[must_use]
    pub fn caused_by(mut self, cause: Failure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Append `cause` at the end of the existing chain.
    #[must_use]
    pub fn with_root_cause(mut self, cause: Failure) -> Self {
        let mut slot = &mut self.cause;
        while let Some(next) = slot {
            slot = &mut next.cause;
        }
        *slot = Some(Box::new(cause));
        self
    }

    /// Iterate over this failure followed by each of its causes.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The deepest failure in the chain.
    pub fn root_cause(&self) -> &Failure {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }

    /// Whether `code` appears anywhere in the chain.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.chain().any(|failure| failure.code == code)
    }
}

/// Iterator over a failure and its causes, outermost first.
pub struct Chain<'a> {
    next: Option<&'a Failure>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Failure;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests;
