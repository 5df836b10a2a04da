//! Host-tunable behavior.

/// Options shared by a context and every context derived from it.
///
/// Both flags default to `false`: `Null` and `Undefined` refuse to coerce
/// into other types unless the host opts in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// `Null` coerces to `"null"`, `0`, `0.0` and `false`.
    pub null_type_coercible: bool,
    /// `Undefined` coerces to `"undefined"`, `0`, `0.0` and `false`.
    pub undefined_type_coercible: bool,
}

impl ContextOptions {
    #[must_use]
    pub fn null_type_coercible(mut self, coercible: bool) -> Self {
        self.null_type_coercible = coercible;
        self
    }

    #[must_use]
    pub fn undefined_type_coercible(mut self, coercible: bool) -> Self {
        self.undefined_type_coercible = coercible;
        self
    }
}

/// Thresholds enforced by [`RecursionLimiter`](crate::RecursionLimiter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecursionLimits {
    /// Deepest context a call may start from. `None` disables the check.
    pub max_depth: Option<usize>,
    /// Most simultaneous invocations of one function. `None` disables the check.
    pub max_recursion: Option<usize>,
    /// Report limit failures without the thresholds.
    pub hidden: bool,
}

impl RecursionLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_RECURSION: usize = 64;

    pub fn unlimited() -> Self {
        RecursionLimits {
            max_depth: None,
            max_recursion: None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = Some(max_recursion);
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Default for RecursionLimits {
    fn default() -> Self {
        RecursionLimits {
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
            max_recursion: Some(Self::DEFAULT_MAX_RECURSION),
            hidden: false,
        }
    }
}
