use thiserror::Error;

/// Error codes prefixed by phase: R = reference/validation, M = method
/// registration, D = dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Reference / validation
    R001, // unresolved forward reference
    R002, // forward reference bound twice
    R003, // validation depth budget exhausted

    // Registration
    M001, // variadic or keyword parameter
    M002, // parameter count disagrees with the method's arity

    // Dispatch
    D001, // wrong argument count
    D002, // unknown method
    D003, // no signature matched
    D004, // implementation reported a failure
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::R003 => "R003",
            Self::M001 => "M001",
            Self::M002 => "M002",
            Self::D001 => "D001",
            Self::D002 => "D002",
            Self::D003 => "D003",
            Self::D004 => "D004",
        }
    }

    /// Structural errors come from the schema or the data shape, never from
    /// an implementation body.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::D004)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("[R001] reference `{label}` was validated before it was bound")]
    UnresolvedReference { label: String },

    #[error("[R002] reference `{label}` is already bound")]
    AlreadyBound { label: String },

    #[error("[R003] validation exceeded the maximum depth of {max}")]
    DepthExceeded { max: usize },

    #[error("[M001] `{method}`: parameter {position} is {form}; only positional parameters can be dispatched on")]
    InvalidSignature {
        method:   String,
        position: usize,
        form:     &'static str,
    },

    #[error("[M002] `{method}` takes {expected} argument(s), but this signature declares {found}")]
    ArityMismatch {
        method:   String,
        expected: usize,
        found:    usize,
    },

    #[error("[D001] `{method}` expects {expected} argument(s), got {found}")]
    Arity {
        method:   String,
        expected: usize,
        found:    usize,
    },

    #[error("[D002] no method named `{method}` is registered")]
    UnknownMethod { method: String },

    #[error("[D003] no signature of `{method}` matches ({args})")]
    NoMatchingMethod { method: String, args: String },

    #[error("[D004] `{method}` failed: {message}")]
    Failed { method: String, message: String },
}

impl Error {
    /// Domain failure raised from inside an implementation body.
    pub fn failed(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed { method: method.into(), message: message.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnresolvedReference { .. } => ErrorCode::R001,
            Self::AlreadyBound { .. }        => ErrorCode::R002,
            Self::DepthExceeded { .. }       => ErrorCode::R003,
            Self::InvalidSignature { .. }    => ErrorCode::M001,
            Self::ArityMismatch { .. }       => ErrorCode::M002,
            Self::Arity { .. }               => ErrorCode::D001,
            Self::UnknownMethod { .. }       => ErrorCode::D002,
            Self::NoMatchingMethod { .. }    => ErrorCode::D003,
            Self::Failed { .. }              => ErrorCode::D004,
        }
    }
}
