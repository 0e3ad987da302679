// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request status tracking and transition logic.
//!
//! This module defines request status states and valid transitions.
//! Status transitions are counselor-initiated only; the system never
//! advances status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status states tracking a request through the counseling lifecycle.
///
/// Status is tracked per request, for appointments and psychological
/// tests alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted by a student, awaiting counselor triage.
    Pending,
    /// Settled on the student's requested date (or a counselor-chosen one).
    Accepted,
    /// Settled, but moved to a counselor-chosen date and slot.
    Rescheduled,
    /// Declined by a counselor. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rescheduled => "rescheduled",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rescheduled" => Ok(Self::Rescheduled),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Returns true if the request is settled on a concrete date and slot.
    ///
    /// Settled requests carry non-null scheduled fields; pending and
    /// rejected requests never do.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rescheduled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Accepted`, `Rescheduled`, or `Rejected`
    /// - `Accepted` → `Rescheduled` or `Rejected`
    /// - `Rescheduled` → `Rescheduled` or `Rejected`
    ///
    /// `Rejected` has no outgoing transitions, and a settled request can
    /// only be moved again via reschedule, never re-accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(
                new_status,
                Self::Accepted | Self::Rescheduled | Self::Rejected
            ),
            Self::Accepted | Self::Rescheduled => {
                matches!(new_status, Self::Rescheduled | Self::Rejected)
            }
            Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by request lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
