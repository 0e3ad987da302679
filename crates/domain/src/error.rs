// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested date is missing or empty.
    EmptyRequestedDate,
    /// No preferred time slots were provided.
    NoRequestedSlots,
    /// A provided time slot token is empty.
    EmptySlot,
    /// The contact phone number is missing or empty.
    EmptyPhoneNumber,
    /// A reschedule was attempted without a target date.
    EmptyScheduledDate,
    /// A reschedule was attempted without a target slot.
    EmptyScheduledSlot,
    /// Request status string is not recognized.
    InvalidStatus {
        /// The unrecognized status value.
        status: String,
    },
    /// Role string is not recognized.
    InvalidRole(String),
    /// Request kind string is not recognized.
    InvalidRequestKind(String),
    /// A status transition violates the request lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The attempted target status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Scheduled date/slot presence does not match the request status.
    ScheduledFieldsInconsistent {
        /// The status the request is in.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRequestedDate => write!(f, "Requested date must not be empty"),
            Self::NoRequestedSlots => write!(f, "At least one preferred time slot is required"),
            Self::EmptySlot => write!(f, "Time slot must not be empty"),
            Self::EmptyPhoneNumber => write!(f, "Phone number must not be empty"),
            Self::EmptyScheduledDate => write!(f, "Scheduled date must not be empty"),
            Self::EmptyScheduledSlot => write!(f, "Scheduled time slot must not be empty"),
            Self::InvalidStatus { status } => write!(f, "Invalid request status: {status}"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidRequestKind(kind) => write!(f, "Invalid request kind: {kind}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition request from {from} to {to}: {reason}")
            }
            Self::ScheduledFieldsInconsistent { status } => {
                write!(
                    f,
                    "Scheduled date and slot must be set exactly when status is settled, but status is {status}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
