// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-slot format policy for the API boundary.
//!
//! The domain treats slot tokens as opaque strings; the API enforces
//! the `START-END` display convention (e.g. `9:00-10:00`) so every slot
//! that reaches storage renders consistently.

use guidance_desk_domain::TimeSlot;
use thiserror::Error;

/// Slot-format policy violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotPolicyError {
    /// The slot token was empty.
    #[error("time slot must not be empty")]
    Empty,
    /// The slot token has no `START-END` separator.
    #[error("time slot '{0}' must be of the form START-END, e.g. 9:00-10:00")]
    MissingSeparator(String),
    /// One side of the slot is not a valid clock time.
    #[error("time slot '{slot}' has an invalid time token '{token}'")]
    InvalidTime {
        /// The full slot token.
        slot: String,
        /// The side that failed to parse.
        token: String,
    },
}

fn validate_clock_time(slot: &str, token: &str) -> Result<(), SlotPolicyError> {
    let invalid = || SlotPolicyError::InvalidTime {
        slot: slot.to_string(),
        token: token.to_string(),
    };

    let (hour, minute) = token.split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute_valid: bool = minute.len() == 2 && minute.parse::<u8>().is_ok_and(|m| m < 60);

    if hour < 24 && minute_valid {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validates a single slot token against the display convention.
///
/// # Errors
///
/// Returns an error if the token is empty, lacks a separator, or either
/// side is not a valid clock time.
pub fn validate_slot_token(slot: &TimeSlot) -> Result<(), SlotPolicyError> {
    let value: &str = slot.value();
    if value.is_empty() {
        return Err(SlotPolicyError::Empty);
    }

    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| SlotPolicyError::MissingSeparator(value.to_string()))?;
    validate_clock_time(value, start.trim())?;
    validate_clock_time(value, end.trim())?;
    Ok(())
}

/// Validates every slot token in a preference list.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_slot_tokens(slots: &[TimeSlot]) -> Result<(), SlotPolicyError> {
    slots.iter().try_for_each(validate_slot_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_conventional_slots() {
        assert!(validate_slot_token(&TimeSlot::new("9:00-10:00")).is_ok());
        assert!(validate_slot_token(&TimeSlot::new("1:00-2:00")).is_ok());
        assert!(validate_slot_token(&TimeSlot::new("13:30-14:30")).is_ok());
    }

    #[test]
    fn test_rejects_empty_token() {
        assert_eq!(
            validate_slot_token(&TimeSlot::new("")),
            Err(SlotPolicyError::Empty)
        );
    }

    #[test]
    fn test_rejects_missing_separator() {
        assert!(matches!(
            validate_slot_token(&TimeSlot::new("9:00")),
            Err(SlotPolicyError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_clock_times() {
        assert!(matches!(
            validate_slot_token(&TimeSlot::new("25:00-26:00")),
            Err(SlotPolicyError::InvalidTime { .. })
        ));
        assert!(matches!(
            validate_slot_token(&TimeSlot::new("9:0-10:00")),
            Err(SlotPolicyError::InvalidTime { .. })
        ));
        assert!(matches!(
            validate_slot_token(&TimeSlot::new("nine-ten")),
            Err(SlotPolicyError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_validates_whole_preference_list() {
        let slots = vec![TimeSlot::new("9:00-10:00"), TimeSlot::new("bad")];
        assert!(validate_slot_tokens(&slots).is_err());
    }
}
