// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guidance_desk_domain::{DomainError, RequestKind};

/// Errors that can occur while applying lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An operation targeted the wrong kind of request.
    KindMismatch {
        /// The kind the operation requires.
        expected: RequestKind,
        /// The kind of the targeted request.
        actual: RequestKind,
    },
    /// An internal error occurred.
    Internal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::KindMismatch { expected, actual } => {
                write!(
                    f,
                    "Operation requires a {} request, but the target is a {} request",
                    expected.as_str(),
                    actual.as_str()
                )
            }
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
