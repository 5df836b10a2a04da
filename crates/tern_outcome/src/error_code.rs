use std::fmt;

/// Error codes for every failure the runtime can raise.
///
/// Format: T#### where the first digit is the category:
/// - T1xxx: Access / authorization
/// - T2xxx: Resolution
/// - T3xxx: Mutation
/// - T4xxx: Resource limits
/// - T5xxx: Declaration and invocation
/// - T9xxx: Raised by native function bodies
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum ErrorCode {
    // Access (T1xxx)
    /// A restriction check denied the operation
    AccessDenied = 1001,

    // Resolution (T2xxx)
    /// Variable not found in any reachable scope
    UndeclaredVariable = 2001,
    /// No overload found in any reachable scope
    UndeclaredFunction = 2002,

    // Mutation (T3xxx)
    /// Variable write rejected
    FailedToSetVariable = 3001,
    /// Function registration rejected
    FailedToRegisterFunction = 3002,

    // Resource limits (T4xxx)
    /// Context depth limit reached
    MaxDepthReached = 4001,
    /// Context depth limit reached, threshold withheld
    MaxDepthReachedHidden = 4002,
    /// Per-function recursion limit reached
    MaxRecursionReached = 4003,
    /// Per-function recursion limit reached, threshold withheld
    MaxRecursionReachedHidden = 4004,
    /// Subroutine call budget used up
    CallBudgetExhausted = 4005,

    // Declaration and invocation (T5xxx)
    /// Substitute default does not satisfy its parameter type
    InvalidParameterDefault = 5001,
    /// Argument could not be converted for a native body
    InvalidArgument = 5002,
    /// Function built without a body
    MissingBody = 5003,

    // Native (T9xxx)
    /// Failure raised by a native function body
    Native = 9001,
}

/// Coarse grouping of error codes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    Access,
    Resolution,
    Mutation,
    ResourceLimit,
    Declaration,
    Native,
}

impl ErrorCode {
    /// Numeric value of the code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::AccessDenied => "T1001",
            ErrorCode::UndeclaredVariable => "T2001",
            ErrorCode::UndeclaredFunction => "T2002",
            ErrorCode::FailedToSetVariable => "T3001",
            ErrorCode::FailedToRegisterFunction => "T3002",
            ErrorCode::MaxDepthReached => "T4001",
            ErrorCode::MaxDepthReachedHidden => "T4002",
            ErrorCode::MaxRecursionReached => "T4003",
            ErrorCode::MaxRecursionReachedHidden => "T4004",
            ErrorCode::CallBudgetExhausted => "T4005",
            ErrorCode::InvalidParameterDefault => "T5001",
            ErrorCode::InvalidArgument => "T5002",
            ErrorCode::MissingBody => "T5003",
            ErrorCode::Native => "T9001",
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self.as_u16() / 1000 {
            1 => ErrorCategory::Access,
            2 => ErrorCategory::Resolution,
            3 => ErrorCategory::Mutation,
            4 => ErrorCategory::ResourceLimit,
            5 => ErrorCategory::Declaration,
            _ => ErrorCategory::Native,
        }
    }

    /// Whether this code withholds the configured threshold from its message.
    pub fn is_hidden(self) -> bool {
        matches!(
            self,
            ErrorCode::MaxDepthReachedHidden | ErrorCode::MaxRecursionReachedHidden
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
