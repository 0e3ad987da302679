// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These types are distinct from domain types and represent the wire
//! contract; translation to and from domain values happens in the
//! operation functions.

use guidance_desk_domain::{College, Request, RequestDetails, StudentRef};
use serde::{Deserialize, Serialize};

/// Wire representation of the student snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRefDto {
    /// The student's portal user id.
    pub user_id: i64,
    /// The student's display name.
    pub display_name: String,
    /// The external student number.
    pub external_student_id: String,
    /// The student's college code, if any.
    pub college: Option<String>,
}

impl StudentRefDto {
    /// Converts the wire snapshot into the domain snapshot.
    #[must_use]
    pub fn into_student_ref(self) -> StudentRef {
        StudentRef {
            user_id: self.user_id,
            display_name: self.display_name,
            external_student_id: self.external_student_id,
            college: self.college.as_deref().map(College::new),
        }
    }

    /// Builds the wire snapshot from the domain snapshot.
    #[must_use]
    pub fn from_student_ref(student: &StudentRef) -> Self {
        Self {
            user_id: student.user_id,
            display_name: student.display_name.clone(),
            external_student_id: student.external_student_id.clone(),
            college: student.college.as_ref().map(ToString::to_string),
        }
    }
}

/// API request to submit an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAppointmentRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// The submitting student's snapshot.
    pub student: StudentRefDto,
    /// The preferred date.
    #[serde(default)]
    pub date: String,
    /// The preferred slots, in preference order.
    #[serde(default)]
    pub preferred_slots: Vec<String>,
    /// Legacy single-slot field.
    #[serde(default)]
    pub time_slot: Option<String>,
    /// Free-text reason for seeking counseling.
    #[serde(default)]
    pub reason: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,
    /// Whether the request is urgent.
    #[serde(default)]
    pub is_urgent: bool,
    /// Optional name as entered on the intake form.
    #[serde(default)]
    pub name_optional: String,
}

/// API request to submit a psychological test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// The submitting student's snapshot.
    pub student: StudentRefDto,
    /// The preferred date.
    #[serde(default)]
    pub date: String,
    /// The preferred slots, in preference order.
    #[serde(default)]
    pub preferred_slots: Vec<String>,
    /// Legacy single-slot field.
    #[serde(default)]
    pub time_slot: Option<String>,
    /// The kind of test requested.
    #[serde(default)]
    pub test_type: String,
    /// Free-text reason for requesting the test.
    #[serde(default)]
    pub reason: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,
}

/// API request to accept a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// Counselor-chosen date; defaults to the requested date.
    #[serde(default)]
    pub date: Option<String>,
    /// Counselor-chosen slot; defaults to the first preferred slot.
    #[serde(default)]
    pub slot: Option<String>,
    /// Optional note to the student.
    #[serde(default)]
    pub note: Option<String>,
}

/// API request to reschedule a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// The new date. Required.
    #[serde(default)]
    pub date: String,
    /// The new slot. Required.
    #[serde(default)]
    pub slot: String,
    /// Optional note to the student.
    #[serde(default)]
    pub note: Option<String>,
}

/// API request to reject a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// Optional rejection reason shown to the student.
    #[serde(default)]
    pub note: Option<String>,
}

/// API request to record a post-session form on an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFormRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// The opaque session form blob.
    pub form: serde_json::Value,
}

/// API request to create or update a counselor directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertCounselorRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// The counselor's portal user id.
    pub user_id: i64,
    /// The counselor's display name.
    pub display_name: String,
    /// The college this counselor serves, if scoped to one.
    #[serde(default)]
    pub college: Option<String>,
}

/// API request to broadcast an announcement to every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    /// The actor performing this action.
    pub actor_id: i64,
    /// The role of the actor.
    pub actor_role: String,
    /// Announcement headline.
    pub title: String,
    /// Announcement body.
    pub message: String,
    /// Optional in-app link target.
    #[serde(default)]
    pub link: Option<String>,
}

/// Wire representation of a request for listings and write responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    /// The assigned id.
    pub id: i64,
    /// The human-facing display identifier.
    pub control_number: String,
    /// The request kind.
    pub kind: String,
    /// The current status.
    pub status: String,
    /// The student snapshot.
    pub student: StudentRefDto,
    /// The assigned counselor, if any.
    pub counselor_id: Option<i64>,
    /// The requested date.
    pub requested_date: String,
    /// The requested slots.
    pub requested_slots: Vec<String>,
    /// The settled date, if settled.
    pub scheduled_date: Option<String>,
    /// The settled slot, if settled.
    pub scheduled_slot: Option<String>,
    /// The counselor note from the most recent transition.
    pub note: Option<String>,
    /// Whether the request is urgent (appointments only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
    /// The requested test type (psych tests only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    /// Free-text reason.
    pub reason: String,
    /// Whether a session form has been recorded (appointments only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_session_form: Option<bool>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-mutation timestamp.
    pub updated_at: String,
}

impl RequestView {
    /// Builds the wire view of a persisted request.
    ///
    /// Unpersisted requests have no id; the view reports 0 for them,
    /// but operations only build views after persistence.
    #[must_use]
    pub fn from_request(request: &Request) -> Self {
        let (is_urgent, test_type, has_session_form): (
            Option<bool>,
            Option<String>,
            Option<bool>,
        ) = match &request.details {
            RequestDetails::Appointment(details) => (
                Some(details.is_urgent),
                None,
                Some(details.session_form.is_some()),
            ),
            RequestDetails::PsychTest(details) => (None, Some(details.test_type.clone()), None),
        };

        Self {
            id: request.id.unwrap_or(0),
            control_number: request.control_number.value().to_string(),
            kind: request.kind().as_str().to_string(),
            status: request.status.as_str().to_string(),
            student: StudentRefDto::from_student_ref(&request.student),
            counselor_id: request.counselor_id,
            requested_date: request.requested_date.clone(),
            requested_slots: request
                .requested_slots
                .iter()
                .map(ToString::to_string)
                .collect(),
            scheduled_date: request.scheduled_date.clone(),
            scheduled_slot: request.scheduled_slot.as_ref().map(ToString::to_string),
            note: request.note.clone(),
            is_urgent,
            test_type,
            reason: request.reason().to_string(),
            has_session_form,
            created_at: request.created_at.clone(),
            updated_at: request.updated_at.clone(),
        }
    }
}

/// Wire representation of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    /// The assigned id.
    pub id: i64,
    /// The addressed user, or `None` for a broadcast.
    pub recipient_id: Option<i64>,
    /// The addressed role for role-filtered broadcasts.
    pub recipient_role: Option<String>,
    /// Short headline.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Presentation severity.
    pub severity: String,
    /// Optional in-app link target.
    pub link: Option<String>,
    /// Whether the recipient has read this notification.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl NotificationView {
    /// Builds the wire view of a persisted notification.
    #[must_use]
    pub fn from_notification(notification: &guidance_desk_notify::Notification) -> Self {
        Self {
            id: notification.id.unwrap_or(0),
            recipient_id: notification.recipient_id,
            recipient_role: notification.recipient_role.map(|r| r.as_str().to_string()),
            title: notification.title.clone(),
            message: notification.message.clone(),
            severity: notification.severity.as_str().to_string(),
            link: notification.link.clone(),
            read: notification.read,
            created_at: notification.created_at.clone(),
        }
    }
}

/// API response for notification listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    /// Visible notifications, newest first.
    pub notifications: Vec<NotificationView>,
    /// How many of them are unread.
    pub unread_count: i64,
}
