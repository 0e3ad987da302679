// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::assign::auto_assign_counselor;
use crate::command::{AppointmentForm, SettleAction, TestRequestForm};
use crate::error::CoreError;
use guidance_desk_domain::{
    AppointmentDetails, ControlNumber, CounselorProfile, DomainError, IntakeFormSnapshot,
    PsychTestDetails, Request, RequestDetails, RequestKind, RequestStatus, StudentRef, TimeSlot,
    validate_reschedule_fields, validate_submission,
};
use guidance_desk_notify::{Notification, Severity};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The result of a successful submission.
///
/// The request is not yet persisted (`request.id` is `None`); the caller
/// persists it and then emits the notification, best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// The new pending request.
    pub request: Request,
    /// The notification to the counterpart actor.
    /// `None` only when no counselor could be assigned.
    pub notification: Option<Notification>,
}

/// The result of a successful settle transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without producing an updated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The updated request.
    pub request: Request,
    /// The notification to the student who owns the request.
    pub notification: Notification,
}

/// Formats a timestamp for storage.
fn rfc3339(now: OffsetDateTime) -> Result<String, CoreError> {
    now.format(&Rfc3339)
        .map_err(|e| CoreError::Internal(format!("failed to format timestamp: {e}")))
}

/// Milliseconds since the Unix epoch, used for control-number stamps.
const fn unix_ms(now: OffsetDateTime) -> i128 {
    now.unix_timestamp_nanos() / 1_000_000
}

/// Creates a new appointment request from a student submission.
///
/// Validates the form, auto-assigns a counselor from the directory,
/// stamps the control number and timestamps, and freezes the intake-form
/// snapshot.
///
/// # Arguments
///
/// * `directory` - The counselor directory, in directory order
/// * `student` - Snapshot of the submitting student
/// * `form` - The submitted form
/// * `now` - The submission time
///
/// # Returns
///
/// A `SubmissionResult` carrying the pending request and, when a
/// counselor was assigned, the notification addressed to them.
///
/// # Errors
///
/// Returns an error if the form fails submission validation.
pub fn submit_appointment(
    directory: &[CounselorProfile],
    student: StudentRef,
    form: AppointmentForm,
    now: OffsetDateTime,
) -> Result<SubmissionResult, CoreError> {
    let slots: Vec<TimeSlot> = form.effective_slots();
    validate_submission(&form.date, &slots, &form.phone_number)?;

    let counselor_id: Option<i64> = auto_assign_counselor(directory, student.college.as_ref());
    let created_at: String = rfc3339(now)?;

    let intake_form: IntakeFormSnapshot = IntakeFormSnapshot {
        date_today: now.date().to_string(),
        name_optional: form.name_optional.clone(),
        id_no: student.external_student_id.clone(),
        college: student.college.clone(),
        phone_number: form.phone_number.clone(),
        preferred_appointment_date: form.date.clone(),
        is_urgent: form.is_urgent,
        preferred_slots: slots.clone(),
        student_signature: None,
        authorized_signature: None,
    };

    let notification: Option<Notification> = counselor_id.map(|id| {
        Notification::new(
            Some(id),
            None,
            String::from("New Appointment Request"),
            format!(
                "{} has requested an appointment for {}.",
                student.display_name, form.date
            ),
            Severity::Info,
            Some(String::from("/counselor/appointments")),
            created_at.clone(),
        )
    });

    let request: Request = Request {
        id: None,
        control_number: ControlNumber::generate(RequestKind::Appointment, unix_ms(now)),
        status: RequestStatus::Pending,
        student,
        counselor_id,
        requested_date: form.date,
        requested_slots: slots,
        scheduled_date: None,
        scheduled_slot: None,
        note: None,
        created_at: created_at.clone(),
        updated_at: created_at,
        details: RequestDetails::Appointment(AppointmentDetails {
            is_urgent: form.is_urgent,
            reason: form.reason,
            phone_number: form.phone_number,
            intake_form,
            session_form: None,
        }),
    };

    Ok(SubmissionResult {
        request,
        notification,
    })
}

/// Creates a new psychological-test request from a student submission.
///
/// Test requests are not assigned at creation; they land in the shared
/// triage pool and the notification is a role-filtered broadcast to
/// counselors.
///
/// # Errors
///
/// Returns an error if the form fails submission validation.
pub fn submit_test_request(
    student: StudentRef,
    form: TestRequestForm,
    now: OffsetDateTime,
) -> Result<SubmissionResult, CoreError> {
    let slots: Vec<TimeSlot> = form.effective_slots();
    validate_submission(&form.date, &slots, &form.phone_number)?;

    let test_type: String = form.effective_test_type();
    let created_at: String = rfc3339(now)?;

    let notification: Notification = Notification::new(
        None,
        Some(guidance_desk_domain::Role::Counselor),
        String::from("New Test Request"),
        format!(
            "{} has requested a {} for {}.",
            student.display_name, test_type, form.date
        ),
        Severity::Info,
        Some(String::from("/counselor/appointments")),
        created_at.clone(),
    );

    let request: Request = Request {
        id: None,
        control_number: ControlNumber::generate(RequestKind::PsychTest, unix_ms(now)),
        status: RequestStatus::Pending,
        student,
        counselor_id: None,
        requested_date: form.date,
        requested_slots: slots,
        scheduled_date: None,
        scheduled_slot: None,
        note: None,
        created_at: created_at.clone(),
        updated_at: created_at,
        details: RequestDetails::PsychTest(PsychTestDetails {
            test_type,
            reason: form.reason,
            phone_number: form.phone_number,
        }),
    };

    Ok(SubmissionResult {
        request,
        notification: Some(notification),
    })
}

/// Applies a counselor's settle action to a request.
///
/// Validates the status transition against the lifecycle rules, updates
/// the scheduled fields, refreshes `updated_at`, and produces the
/// notification addressed to the student.
///
/// # Arguments
///
/// * `request` - The current request (immutable)
/// * `action` - The settle action to apply
/// * `now` - The transition time
///
/// # Errors
///
/// Returns an error if:
/// - The transition violates the lifecycle rules (terminal guard,
///   re-accept guard)
/// - A reschedule is missing its target date or slot
pub fn settle(
    request: &Request,
    action: SettleAction,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let target: RequestStatus = match action {
        SettleAction::Accept { .. } => RequestStatus::Accepted,
        SettleAction::Reschedule { .. } => RequestStatus::Rescheduled,
        SettleAction::Reject { .. } => RequestStatus::Rejected,
    };
    request.status.validate_transition(target)?;

    let mut updated: Request = request.clone();
    updated.status = target;
    updated.updated_at = rfc3339(now)?;

    let notification: Notification = match action {
        SettleAction::Accept { date, slot, note } => {
            let scheduled_date: String = date.unwrap_or_else(|| updated.requested_date.clone());
            let scheduled_slot: TimeSlot = match slot {
                Some(slot) => slot,
                None => updated
                    .requested_slots
                    .first()
                    .cloned()
                    .ok_or(CoreError::DomainViolation(
                        DomainError::NoRequestedSlots,
                    ))?,
            };
            updated.scheduled_date = Some(scheduled_date.clone());
            updated.scheduled_slot = Some(scheduled_slot);
            updated.note = note;

            accept_notification(&updated, &scheduled_date)
        }
        SettleAction::Reschedule { date, slot, note } => {
            validate_reschedule_fields(&date, &slot)?;
            updated.scheduled_date = Some(date.clone());
            updated.scheduled_slot = Some(slot.clone());
            updated.note = note.clone();

            reschedule_notification(&updated, &date, &slot, note.as_deref())
        }
        SettleAction::Reject { note } => {
            // Scheduled fields are left untouched on rejection.
            updated.note = note.clone();

            reject_notification(&updated, note.as_deref())
        }
    };

    Ok(TransitionResult {
        request: updated,
        notification,
    })
}

/// Stores the counselor's post-session form on an appointment.
///
/// The blob is opaque to the engine; no status change and no
/// notification result from recording it.
///
/// # Errors
///
/// Returns `CoreError::KindMismatch` if the target is not an appointment.
pub fn record_session_form(
    request: &Request,
    form: serde_json::Value,
    now: OffsetDateTime,
) -> Result<Request, CoreError> {
    let mut updated: Request = request.clone();
    match &mut updated.details {
        RequestDetails::Appointment(details) => {
            details.session_form = Some(form);
        }
        RequestDetails::PsychTest(_) => {
            return Err(CoreError::KindMismatch {
                expected: RequestKind::Appointment,
                actual: RequestKind::PsychTest,
            });
        }
    }
    updated.updated_at = rfc3339(now)?;
    Ok(updated)
}

fn accept_notification(request: &Request, scheduled_date: &str) -> Notification {
    let (title, message): (&str, String) = match &request.details {
        RequestDetails::Appointment(_) => (
            "Appointment Accepted",
            format!(
                "Your appointment request for {scheduled_date} has been accepted."
            ),
        ),
        RequestDetails::PsychTest(details) => (
            "Test Request Accepted",
            format!(
                "Your {} request for {scheduled_date} has been accepted.",
                details.test_type
            ),
        ),
    };

    student_notification(request, title, message, Severity::Success)
}

fn reschedule_notification(
    request: &Request,
    date: &str,
    slot: &TimeSlot,
    note: Option<&str>,
) -> Notification {
    let (title, mut message): (&str, String) = match &request.details {
        RequestDetails::Appointment(_) => (
            "Appointment Rescheduled",
            format!("Your appointment has been rescheduled to {date} at {slot}."),
        ),
        RequestDetails::PsychTest(details) => (
            "Test Rescheduled",
            format!(
                "Your {} has been rescheduled to {date} at {slot}.",
                details.test_type
            ),
        ),
    };
    if let Some(note) = note {
        message.push_str(&format!(" Note: {note}"));
    }

    student_notification(request, title, message, Severity::Warning)
}

fn reject_notification(request: &Request, note: Option<&str>) -> Notification {
    let (title, mut message): (&str, String) = match &request.details {
        RequestDetails::Appointment(_) => (
            "Appointment Rejected",
            String::from("Your appointment request has been rejected."),
        ),
        RequestDetails::PsychTest(details) => (
            "Test Request Rejected",
            format!("Your {} request has been rejected.", details.test_type),
        ),
    };
    if let Some(note) = note {
        message.push_str(&format!(" Reason: {note}"));
    }

    student_notification(request, title, message, Severity::Error)
}

fn student_notification(
    request: &Request,
    title: &str,
    message: String,
    severity: Severity,
) -> Notification {
    Notification::new(
        Some(request.student.user_id),
        None,
        title.to_string(),
        message,
        severity,
        Some(String::from("/")),
        request.updated_at.clone(),
    )
}
