// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Actor roles recognized by the portal.
///
/// Roles gate which operations an actor may perform and which requests
/// an actor may see. They apply to portal users, not to system operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Students submit appointment and test requests and read their own.
    Student,
    /// Counselors triage and settle requests assigned to them.
    Counselor,
    /// College representatives read aggregated data for their college.
    CollegeRep,
    /// Admins manage the counselor directory and broadcast announcements.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Counselor => "counselor",
            Self::CollegeRep => "college_rep",
            Self::Admin => "admin",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the string is not a valid role.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "student" => Ok(Self::Student),
            "counselor" => Ok(Self::Counselor),
            "college_rep" => Ok(Self::CollegeRep),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two kinds of requests the portal coordinates.
///
/// Appointments and psychological tests share one lifecycle shape but
/// live in separate collections with separate id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// A counseling appointment request.
    Appointment,
    /// A psychological test request.
    PsychTest,
}

impl RequestKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::PsychTest => "psych_test",
        }
    }

    /// Returns the control-number prefix for this kind.
    #[must_use]
    pub const fn control_prefix(&self) -> &'static str {
        match self {
            Self::Appointment => "APT",
            Self::PsychTest => "PT",
        }
    }

    /// Parses a kind from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRequestKind` if the string is not a
    /// valid kind.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "appointment" => Ok(Self::Appointment),
            "psych_test" => Ok(Self::PsychTest),
            _ => Err(DomainError::InvalidRequestKind(s.to_string())),
        }
    }
}

impl FromStr for RequestKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A college identifier (e.g., "CICS", "COE").
///
/// Colleges are normalized to uppercase to ensure case-insensitive
/// matching between students and counselors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct College {
    value: String,
}

impl College {
    /// Creates a new `College`.
    ///
    /// # Arguments
    ///
    /// * `value` - The college code (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the college code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for College {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A time-slot token such as `"9:00-10:00"`.
///
/// The domain treats slot tokens as opaque preferences; format policy is
/// enforced at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot {
    value: String,
}

impl TimeSlot {
    /// Creates a new `TimeSlot`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the slot token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the slot token is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A human-facing display identifier for a request.
///
/// Control numbers are distinct from internal ids: they are generated at
/// creation from the kind prefix and a millisecond creation stamp, never
/// reused, and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlNumber {
    value: String,
}

impl ControlNumber {
    /// Generates a control number for a request created at the given
    /// millisecond timestamp.
    ///
    /// Uniqueness holds under the single-writer assumption: two requests
    /// of the same kind are never created within the same millisecond.
    #[must_use]
    pub fn generate(kind: RequestKind, timestamp_ms: i128) -> Self {
        Self {
            value: format!("{}-{timestamp_ms}", kind.control_prefix()),
        }
    }

    /// Wraps an already-assigned control number (from persistence).
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the display identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ControlNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A denormalized snapshot of the student at submission time.
///
/// The snapshot is deliberately not live-joined against the identity
/// directory: the request must reflect the student's name and college as
/// they were when the request was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    /// The student's portal user id.
    pub user_id: i64,
    /// The student's display name at submission time.
    pub display_name: String,
    /// The external student number (e.g., "S2025001").
    pub external_student_id: String,
    /// The student's college at submission time, if any.
    pub college: Option<College>,
}

/// A read-only projection of an identity-directory user with the
/// counselor role.
///
/// The engine consumes the counselor directory only for auto-assignment;
/// it never writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounselorProfile {
    /// The counselor's portal user id.
    pub user_id: i64,
    /// The counselor's display name.
    pub display_name: String,
    /// The college this counselor serves, if scoped to one.
    pub college: Option<College>,
}
