// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::request::Request;
use crate::types::TimeSlot;

/// Validates the fields a student must supply at submission time.
///
/// # Arguments
///
/// * `requested_date` - The preferred date
/// * `requested_slots` - The preferred slots, in preference order
/// * `phone_number` - The contact phone number
///
/// # Errors
///
/// Returns an error if the date is empty, no slots were provided, any
/// slot token is empty, or the phone number is empty.
pub fn validate_submission(
    requested_date: &str,
    requested_slots: &[TimeSlot],
    phone_number: &str,
) -> Result<(), DomainError> {
    if requested_date.trim().is_empty() {
        return Err(DomainError::EmptyRequestedDate);
    }
    if requested_slots.is_empty() {
        return Err(DomainError::NoRequestedSlots);
    }
    if requested_slots.iter().any(TimeSlot::is_empty) {
        return Err(DomainError::EmptySlot);
    }
    if phone_number.trim().is_empty() {
        return Err(DomainError::EmptyPhoneNumber);
    }
    Ok(())
}

/// Validates the target fields of a reschedule.
///
/// Unlike accept, reschedule never falls back to the requested date or
/// slots; both target fields are required.
///
/// # Errors
///
/// Returns an error if the date or slot is empty.
pub fn validate_reschedule_fields(date: &str, slot: &TimeSlot) -> Result<(), DomainError> {
    if date.trim().is_empty() {
        return Err(DomainError::EmptyScheduledDate);
    }
    if slot.is_empty() {
        return Err(DomainError::EmptyScheduledSlot);
    }
    Ok(())
}

/// Validates the scheduled-field consistency invariant on a request.
///
/// `scheduled_date` and `scheduled_slot` must be `Some` exactly when the
/// status is settled (accepted or rescheduled).
///
/// # Errors
///
/// Returns `DomainError::ScheduledFieldsInconsistent` if the invariant
/// does not hold.
pub fn validate_scheduled_fields(request: &Request) -> Result<(), DomainError> {
    let settled = request.status.is_settled();
    let populated = request.scheduled_date.is_some() && request.scheduled_slot.is_some();
    let cleared = request.scheduled_date.is_none() && request.scheduled_slot.is_none();

    if (settled && populated) || (!settled && cleared) {
        Ok(())
    } else {
        Err(DomainError::ScheduledFieldsInconsistent {
            status: request.status.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_requires_date() {
        let slots = vec![TimeSlot::new("9:00-10:00")];
        let result = validate_submission("  ", &slots, "0912");
        assert_eq!(result, Err(DomainError::EmptyRequestedDate));
    }

    #[test]
    fn test_submission_requires_slots() {
        let result = validate_submission("2025-12-10", &[], "0912");
        assert_eq!(result, Err(DomainError::NoRequestedSlots));
    }

    #[test]
    fn test_submission_rejects_blank_slot_token() {
        let slots = vec![TimeSlot::new("9:00-10:00"), TimeSlot::new("  ")];
        let result = validate_submission("2025-12-10", &slots, "0912");
        assert_eq!(result, Err(DomainError::EmptySlot));
    }

    #[test]
    fn test_submission_requires_phone_number() {
        let slots = vec![TimeSlot::new("9:00-10:00")];
        let result = validate_submission("2025-12-10", &slots, "");
        assert_eq!(result, Err(DomainError::EmptyPhoneNumber));
    }

    #[test]
    fn test_submission_accepts_complete_form() {
        let slots = vec![TimeSlot::new("9:00-10:00")];
        assert!(validate_submission("2025-12-10", &slots, "0912").is_ok());
    }

    #[test]
    fn test_reschedule_requires_both_fields() {
        assert_eq!(
            validate_reschedule_fields("", &TimeSlot::new("1:00-2:00")),
            Err(DomainError::EmptyScheduledDate)
        );
        assert_eq!(
            validate_reschedule_fields("2025-12-12", &TimeSlot::new("")),
            Err(DomainError::EmptyScheduledSlot)
        );
        assert!(validate_reschedule_fields("2025-12-12", &TimeSlot::new("1:00-2:00")).is_ok());
    }
}
