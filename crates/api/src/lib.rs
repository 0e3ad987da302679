// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod capabilities;
mod error;
mod request_response;
mod slot_policy;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, authenticate_stub};
pub use capabilities::{
    ActorCapabilities, Capability, authorize_broadcast, authorize_manage_counselors,
    authorize_session_form, authorize_settle, authorize_submit, compute_actor_capabilities,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use request_response::{
    AcceptRequest, AnnouncementRequest, NotificationListResponse, NotificationView,
    RejectRequest, RequestView, RescheduleRequest, SessionFormRequest, StudentRefDto,
    SubmitAppointmentRequest, SubmitTestRequest, UpsertCounselorRequest,
};
pub use slot_policy::{SlotPolicyError, validate_slot_token, validate_slot_tokens};

use guidance_desk::{
    AppointmentForm, SettleAction, SubmissionResult, TestRequestForm, TransitionResult,
    record_session_form, settle, submit_appointment, submit_test_request,
};
use guidance_desk_domain::{CounselorProfile, Request, RequestKind, Role, TimeSlot};
use guidance_desk_notify::{Notification, NotificationSink, Severity};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

/// How psychological-test requests are scoped for counselors.
///
/// Appointments are always scoped to the assigned counselor; test
/// scoping is a deployment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriagePolicy {
    /// Every counselor sees every test request (shared triage pool).
    #[default]
    SharedPool,
    /// Counselors see unassigned tests plus tests assigned to them.
    PerCounselor,
}

/// Parses a role string from the wire.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the string is not a valid role.
pub fn parse_role(role_str: &str) -> Result<Role, ApiError> {
    role_str
        .to_lowercase()
        .parse::<Role>()
        .map_err(|_| ApiError::InvalidInput {
            field: String::from("actor_role"),
            message: format!(
                "Invalid role: '{role_str}'. Must be 'student', 'counselor', 'college_rep', or 'admin'"
            ),
        })
}

fn format_timestamp(now: OffsetDateTime) -> Result<String, ApiError> {
    now.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("failed to format timestamp: {e}"),
    })
}

fn to_slots(tokens: &[String]) -> Vec<TimeSlot> {
    tokens.iter().map(|t| TimeSlot::new(t)).collect()
}

/// Submits a new appointment request on behalf of a student.
///
/// Validates authorization and slot format, then delegates to the
/// lifecycle engine. The caller persists the returned request and emits
/// the returned notification.
///
/// # Errors
///
/// Returns an error if the actor is not a student, a slot violates the
/// format policy, or the form fails submission validation.
pub fn submit_appointment_request(
    directory: &[CounselorProfile],
    actor: &AuthenticatedActor,
    request: SubmitAppointmentRequest,
    now: OffsetDateTime,
) -> Result<SubmissionResult, ApiError> {
    authorize_submit(actor)?;

    let preferred_slots: Vec<TimeSlot> = to_slots(&request.preferred_slots);
    validate_slot_tokens(&preferred_slots)?;
    let time_slot: Option<TimeSlot> = request.time_slot.as_deref().map(TimeSlot::new);
    if let Some(slot) = &time_slot {
        validate_slot_token(slot)?;
    }

    let form: AppointmentForm = AppointmentForm {
        date: request.date,
        preferred_slots,
        time_slot,
        reason: request.reason,
        phone_number: request.phone_number,
        is_urgent: request.is_urgent,
        name_optional: request.name_optional,
    };

    let result: SubmissionResult =
        submit_appointment(directory, request.student.into_student_ref(), form, now)
            .map_err(translate_core_error)?;

    info!(
        actor_id = actor.id,
        control_number = result.request.control_number.value(),
        counselor_id = ?result.request.counselor_id,
        "Appointment request submitted"
    );
    Ok(result)
}

/// Submits a new psychological-test request on behalf of a student.
///
/// # Errors
///
/// Returns an error if the actor is not a student, a slot violates the
/// format policy, or the form fails submission validation.
pub fn submit_psych_test_request(
    actor: &AuthenticatedActor,
    request: SubmitTestRequest,
    now: OffsetDateTime,
) -> Result<SubmissionResult, ApiError> {
    authorize_submit(actor)?;

    let preferred_slots: Vec<TimeSlot> = to_slots(&request.preferred_slots);
    validate_slot_tokens(&preferred_slots)?;
    let time_slot: Option<TimeSlot> = request.time_slot.as_deref().map(TimeSlot::new);
    if let Some(slot) = &time_slot {
        validate_slot_token(slot)?;
    }

    let form: TestRequestForm = TestRequestForm {
        date: request.date,
        preferred_slots,
        time_slot,
        test_type: request.test_type,
        reason: request.reason,
        phone_number: request.phone_number,
    };

    let result: SubmissionResult =
        submit_test_request(request.student.into_student_ref(), form, now)
            .map_err(translate_core_error)?;

    info!(
        actor_id = actor.id,
        control_number = result.request.control_number.value(),
        "Test request submitted"
    );
    Ok(result)
}

/// Accepts a request, optionally overriding the scheduled date and slot.
///
/// Accepting an unassigned request claims it for the acting counselor.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor, the slot violates
/// the format policy, or the transition is not permitted.
pub fn accept_request(
    actor: &AuthenticatedActor,
    request: &Request,
    action: AcceptRequest,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    authorize_settle(actor)?;

    let slot: Option<TimeSlot> = action.slot.as_deref().map(TimeSlot::new);
    if let Some(slot) = &slot {
        validate_slot_token(slot)?;
    }

    let mut result: TransitionResult = settle(
        request,
        SettleAction::Accept {
            date: action.date,
            slot,
            note: action.note,
        },
        now,
    )
    .map_err(translate_core_error)?;
    claim_if_unassigned(&mut result.request, actor);

    info!(
        actor_id = actor.id,
        control_number = result.request.control_number.value(),
        "Request accepted"
    );
    Ok(result)
}

/// Moves a request to a new date and slot.
///
/// Rescheduling an unassigned request claims it for the acting
/// counselor.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor, the date or slot
/// is missing or malformed, or the transition is not permitted.
pub fn reschedule_request(
    actor: &AuthenticatedActor,
    request: &Request,
    action: RescheduleRequest,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    authorize_settle(actor)?;

    let slot: TimeSlot = TimeSlot::new(&action.slot);
    if !slot.is_empty() {
        validate_slot_token(&slot)?;
    }

    let mut result: TransitionResult = settle(
        request,
        SettleAction::Reschedule {
            date: action.date,
            slot,
            note: action.note,
        },
        now,
    )
    .map_err(translate_core_error)?;
    claim_if_unassigned(&mut result.request, actor);

    info!(
        actor_id = actor.id,
        control_number = result.request.control_number.value(),
        "Request rescheduled"
    );
    Ok(result)
}

/// Rejects a request. Terminal.
///
/// Rejection does not claim an unassigned request; it stays out of the
/// per-counselor scope it never entered.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor or the transition
/// is not permitted.
pub fn reject_request(
    actor: &AuthenticatedActor,
    request: &Request,
    action: RejectRequest,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    authorize_settle(actor)?;

    let result: TransitionResult = settle(
        request,
        SettleAction::Reject { note: action.note },
        now,
    )
    .map_err(translate_core_error)?;

    info!(
        actor_id = actor.id,
        control_number = result.request.control_number.value(),
        "Request rejected"
    );
    Ok(result)
}

fn claim_if_unassigned(request: &mut Request, actor: &AuthenticatedActor) {
    if request.counselor_id.is_none() {
        request.counselor_id = Some(actor.id);
    }
}

/// Records a counselor's post-session form on an appointment.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor or the target is
/// not an appointment.
pub fn record_session_form_request(
    actor: &AuthenticatedActor,
    request: &Request,
    action: SessionFormRequest,
    now: OffsetDateTime,
) -> Result<Request, ApiError> {
    authorize_session_form(actor)?;
    record_session_form(request, action.form, now).map_err(translate_core_error)
}

/// Filters a request listing down to what the actor may see.
///
/// Students see their own requests; counselors see appointments
/// assigned to them and tests per the triage policy; admins and college
/// representatives see everything.
#[must_use]
pub fn visible_requests(
    actor: &AuthenticatedActor,
    requests: Vec<Request>,
    policy: TriagePolicy,
) -> Vec<Request> {
    match actor.role {
        Role::Student => requests
            .into_iter()
            .filter(|r| r.student.user_id == actor.id)
            .collect(),
        Role::Counselor => requests
            .into_iter()
            .filter(|r| match r.kind() {
                RequestKind::Appointment => r.counselor_id == Some(actor.id),
                RequestKind::PsychTest => match policy {
                    TriagePolicy::SharedPool => true,
                    TriagePolicy::PerCounselor => {
                        r.counselor_id.is_none() || r.counselor_id == Some(actor.id)
                    }
                },
            })
            .collect(),
        Role::CollegeRep | Role::Admin => requests,
    }
}

/// Validates and converts a counselor-directory upsert.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the entry is
/// invalid.
pub fn upsert_counselor_entry(
    actor: &AuthenticatedActor,
    request: UpsertCounselorRequest,
) -> Result<CounselorProfile, ApiError> {
    authorize_manage_counselors(actor)?;

    if request.user_id <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("Counselor user id must be a positive identifier"),
        });
    }
    if request.display_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("display_name"),
            message: String::from("Counselor display name must not be empty"),
        });
    }

    Ok(CounselorProfile {
        user_id: request.user_id,
        display_name: request.display_name,
        college: request
            .college
            .as_deref()
            .map(guidance_desk_domain::College::new),
    })
}

/// Builds an announcement broadcast addressed to every user.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the announcement is
/// missing its title or message.
pub fn broadcast_announcement(
    actor: &AuthenticatedActor,
    request: AnnouncementRequest,
    now: OffsetDateTime,
) -> Result<Notification, ApiError> {
    authorize_broadcast(actor)?;

    if request.title.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Announcement title must not be empty"),
        });
    }
    if request.message.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("message"),
            message: String::from("Announcement message must not be empty"),
        });
    }

    Ok(Notification::new(
        None,
        None,
        request.title,
        request.message,
        Severity::Info,
        request.link,
        format_timestamp(now)?,
    ))
}

/// Delivers a notification to a sink, best-effort.
///
/// Delivery failure is logged and swallowed; it never rolls back the
/// state transition that produced the notification.
pub fn emit_notification(sink: &mut dyn NotificationSink, notification: &Notification) {
    if let Err(e) = sink.deliver(notification) {
        warn!(
            error = %e,
            title = %notification.title,
            "Failed to deliver notification; state transition stands"
        );
    }
}
