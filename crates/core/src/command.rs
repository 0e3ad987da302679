// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guidance_desk_domain::TimeSlot;

/// A student's appointment submission form, as data only.
///
/// Forms carry intent into the engine; they never mutate state
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentForm {
    /// The preferred date.
    pub date: String,
    /// The preferred slots, in preference order.
    pub preferred_slots: Vec<TimeSlot>,
    /// Legacy single-slot field, honored when `preferred_slots` is empty.
    pub time_slot: Option<TimeSlot>,
    /// Free-text reason for seeking counseling.
    pub reason: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Whether the student flagged the request as urgent.
    pub is_urgent: bool,
    /// Optional name as entered on the intake form.
    pub name_optional: String,
}

impl AppointmentForm {
    /// Returns the effective slot preference list.
    ///
    /// Older submission forms carried a single `time_slot` instead of a
    /// preference list; it is honored only when no list was provided.
    #[must_use]
    pub fn effective_slots(&self) -> Vec<TimeSlot> {
        if self.preferred_slots.is_empty() {
            self.time_slot.clone().into_iter().collect()
        } else {
            self.preferred_slots.clone()
        }
    }
}

/// A student's psychological-test submission form, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequestForm {
    /// The preferred date.
    pub date: String,
    /// The preferred slots, in preference order.
    pub preferred_slots: Vec<TimeSlot>,
    /// Legacy single-slot field, honored when `preferred_slots` is empty.
    pub time_slot: Option<TimeSlot>,
    /// The kind of test requested; blank defaults to "Psychological Test".
    pub test_type: String,
    /// Free-text reason for requesting the test.
    pub reason: String,
    /// Contact phone number.
    pub phone_number: String,
}

impl TestRequestForm {
    /// Returns the effective slot preference list.
    #[must_use]
    pub fn effective_slots(&self) -> Vec<TimeSlot> {
        if self.preferred_slots.is_empty() {
            self.time_slot.clone().into_iter().collect()
        } else {
            self.preferred_slots.clone()
        }
    }

    /// Returns the effective test type, defaulting blank input.
    #[must_use]
    pub fn effective_test_type(&self) -> String {
        let trimmed: &str = self.test_type.trim();
        if trimmed.is_empty() {
            String::from("Psychological Test")
        } else {
            trimmed.to_string()
        }
    }
}

/// A counselor's settle action on a request, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleAction {
    /// Accept the request, optionally overriding date and slot.
    ///
    /// Missing fields fall back to the student's requested date and
    /// first preferred slot.
    Accept {
        /// Counselor-chosen date, if different from the requested one.
        date: Option<String>,
        /// Counselor-chosen slot, if different from the first preference.
        slot: Option<TimeSlot>,
        /// Optional note to the student.
        note: Option<String>,
    },
    /// Move the request to a new date and slot. Both are required.
    Reschedule {
        /// The new date.
        date: String,
        /// The new slot.
        slot: TimeSlot,
        /// Optional note to the student.
        note: Option<String>,
    },
    /// Decline the request. Terminal.
    Reject {
        /// Optional reason shown to the student.
        note: Option<String>,
    },
}
