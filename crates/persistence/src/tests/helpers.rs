// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use guidance_desk_domain::{
    AppointmentDetails, College, ControlNumber, IntakeFormSnapshot, PsychTestDetails, Request,
    RequestDetails, RequestKind, RequestStatus, StudentRef, TimeSlot,
};

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_student() -> StudentRef {
    StudentRef {
        user_id: 9,
        display_name: String::from("Abdul Malik"),
        external_student_id: String::from("S2025001"),
        college: Some(College::new("CICS")),
    }
}

/// Builds an unpersisted pending request of the given kind.
///
/// The control number must be distinct per call within a kind; callers
/// pass distinct stamps.
pub fn create_test_request(kind: RequestKind, stamp: i128) -> Request {
    let details: RequestDetails = match kind {
        RequestKind::Appointment => RequestDetails::Appointment(AppointmentDetails {
            is_urgent: false,
            reason: String::from("stress"),
            phone_number: String::from("09123456789"),
            intake_form: IntakeFormSnapshot {
                date_today: String::from("2025-12-05"),
                name_optional: String::new(),
                id_no: String::from("S2025001"),
                college: Some(College::new("CICS")),
                phone_number: String::from("09123456789"),
                preferred_appointment_date: String::from("2025-12-10"),
                is_urgent: false,
                preferred_slots: vec![TimeSlot::new("9:00-10:00")],
                student_signature: None,
                authorized_signature: None,
            },
            session_form: None,
        }),
        RequestKind::PsychTest => RequestDetails::PsychTest(PsychTestDetails {
            test_type: String::from("Psychological Test"),
            reason: String::from("assessment"),
            phone_number: String::from("09123456789"),
        }),
    };

    Request {
        id: None,
        control_number: ControlNumber::generate(kind, stamp),
        status: RequestStatus::Pending,
        student: create_test_student(),
        counselor_id: match kind {
            RequestKind::Appointment => Some(2),
            RequestKind::PsychTest => None,
        },
        requested_date: String::from("2025-12-10"),
        requested_slots: vec![TimeSlot::new("9:00-10:00")],
        scheduled_date: None,
        scheduled_slot: None,
        note: None,
        created_at: String::from("2025-12-05T08:00:00Z"),
        updated_at: String::from("2025-12-05T08:00:00Z"),
        details,
    }
}
