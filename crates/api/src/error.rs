// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use crate::slot_policy::SlotPolicyError;
use guidance_desk::CoreError;
use guidance_desk_domain::DomainError;
use guidance_desk_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: every engine-boundary failure is reported as a value of
/// this type, never thrown across the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A status transition violates the request lifecycle rules.
    InvalidTransition {
        /// A human-readable description of the refused transition.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Slot format policy violation.
    SlotPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidTransition { message } => {
                write!(f, "Invalid transition: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::SlotPolicyViolation { message } => {
                write!(f, "Slot policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<SlotPolicyError> for ApiError {
    fn from(err: SlotPolicyError) -> Self {
        Self::SlotPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyRequestedDate => ApiError::InvalidInput {
            field: String::from("date"),
            message: String::from("Requested date must not be empty"),
        },
        DomainError::NoRequestedSlots => ApiError::InvalidInput {
            field: String::from("preferred_slots"),
            message: String::from("At least one preferred time slot is required"),
        },
        DomainError::EmptySlot => ApiError::InvalidInput {
            field: String::from("preferred_slots"),
            message: String::from("Time slots must not be empty"),
        },
        DomainError::EmptyPhoneNumber => ApiError::InvalidInput {
            field: String::from("phone_number"),
            message: String::from("Phone number must not be empty"),
        },
        DomainError::EmptyScheduledDate => ApiError::InvalidInput {
            field: String::from("date"),
            message: String::from("A reschedule requires a target date"),
        },
        DomainError::EmptyScheduledSlot => ApiError::InvalidInput {
            field: String::from("slot"),
            message: String::from("A reschedule requires a target time slot"),
        },
        DomainError::InvalidStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown request status: {status}"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role: {role}"),
        },
        DomainError::InvalidRequestKind(kind) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown request kind: {kind}"),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        DomainError::ScheduledFieldsInconsistent { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::KindMismatch { .. } => ApiError::InvalidInput {
            field: String::from("id"),
            message: err.to_string(),
        },
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lookup failures map to not-found; everything else is internal and
/// logged here, since callers only surface the API contract.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::RequestNotFound { ref kind, id } => ApiError::ResourceNotFound {
            resource_type: String::from("Request"),
            message: format!("No {kind} request found with id {id}"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("No notification found with id {id}"),
        },
        other => {
            error!(error = %other, "Persistence error");
            ApiError::Internal {
                message: format!("Persistence error: {other}"),
            }
        }
    }
}
