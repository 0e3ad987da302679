// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::RequestStatus;
use crate::types::{College, ControlNumber, RequestKind, StudentRef, TimeSlot};
use serde::{Deserialize, Serialize};

/// A frozen copy of the submitted appointment intake form.
///
/// The snapshot exists for audit and print purposes and is never
/// re-derived from live data after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeFormSnapshot {
    /// Submission date (ISO 8601 date string).
    pub date_today: String,
    /// Optional name as entered on the form.
    pub name_optional: String,
    /// The external student number as entered.
    pub id_no: String,
    /// The student's college at submission time.
    pub college: Option<College>,
    /// Contact phone number as entered.
    pub phone_number: String,
    /// The preferred appointment date as entered.
    pub preferred_appointment_date: String,
    /// Whether the student flagged the request as urgent.
    pub is_urgent: bool,
    /// The preferred time slots as entered.
    pub preferred_slots: Vec<TimeSlot>,
    /// Student signature, collected later on paper if at all.
    pub student_signature: Option<String>,
    /// Authorized signature, collected later on paper if at all.
    pub authorized_signature: Option<String>,
}

/// Appointment-specific request data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    /// Whether the student flagged the request as urgent.
    pub is_urgent: bool,
    /// Free-text reason for seeking counseling.
    pub reason: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Frozen copy of the submitted intake form.
    pub intake_form: IntakeFormSnapshot,
    /// Session form filled in by the counselor after the session.
    /// Opaque to the lifecycle engine.
    pub session_form: Option<serde_json::Value>,
}

/// Psychological-test-specific request data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsychTestDetails {
    /// The kind of test requested (e.g., "Psychological Test").
    pub test_type: String,
    /// Free-text reason for requesting the test.
    pub reason: String,
    /// Contact phone number.
    pub phone_number: String,
}

/// Kind-specific request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RequestDetails {
    /// Appointment payload.
    Appointment(AppointmentDetails),
    /// Psychological test payload.
    PsychTest(PsychTestDetails),
}

/// An appointment or psychological-test booking submitted by a student.
///
/// Requests are created by student-facing submission, mutated only by
/// counselor-facing settle operations, and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The store-assigned identifier.
    /// `None` indicates the request has not been persisted yet.
    pub id: Option<i64>,
    /// Human-facing display identifier, immutable once assigned.
    pub control_number: ControlNumber,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Snapshot of the student at submission time.
    pub student: StudentRef,
    /// The assigned counselor, if any.
    pub counselor_id: Option<i64>,
    /// The student's preferred date. Immutable after creation.
    pub requested_date: String,
    /// The student's preferred slots, in preference order.
    /// Non-empty at creation and immutable afterwards.
    pub requested_slots: Vec<TimeSlot>,
    /// The settled date; `Some` exactly when the status is settled.
    pub scheduled_date: Option<String>,
    /// The settled slot; `Some` exactly when the status is settled.
    pub scheduled_slot: Option<TimeSlot>,
    /// Optional counselor note from the most recent transition.
    pub note: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last-mutation timestamp (RFC 3339); refreshed on every update.
    pub updated_at: String,
    /// Kind-specific payload.
    pub details: RequestDetails,
}

impl Request {
    /// Returns the kind of this request.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self.details {
            RequestDetails::Appointment(_) => RequestKind::Appointment,
            RequestDetails::PsychTest(_) => RequestKind::PsychTest,
        }
    }

    /// Returns the contact phone number from the kind-specific payload.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        match &self.details {
            RequestDetails::Appointment(details) => &details.phone_number,
            RequestDetails::PsychTest(details) => &details.phone_number,
        }
    }

    /// Returns the free-text reason from the kind-specific payload.
    #[must_use]
    pub fn reason(&self) -> &str {
        match &self.details {
            RequestDetails::Appointment(details) => &details.reason,
            RequestDetails::PsychTest(details) => &details.reason,
        }
    }
}
