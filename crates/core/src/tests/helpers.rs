// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppointmentForm, SubmissionResult, TestRequestForm, submit_appointment};
use guidance_desk_domain::{College, CounselorProfile, Request, StudentRef, TimeSlot};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_student() -> StudentRef {
    StudentRef {
        user_id: 9,
        display_name: String::from("Abdul Malik"),
        external_student_id: String::from("S2025001"),
        college: Some(College::new("CICS")),
    }
}

pub fn create_test_directory() -> Vec<CounselorProfile> {
    vec![
        CounselorProfile {
            user_id: 2,
            display_name: String::from("Dr. Maria Santos"),
            college: Some(College::new("COE")),
        },
        CounselorProfile {
            user_id: 3,
            display_name: String::from("Dr. Ahmed Rahman"),
            college: Some(College::new("CICS")),
        },
    ]
}

pub fn create_test_appointment_form() -> AppointmentForm {
    AppointmentForm {
        date: String::from("2025-12-10"),
        preferred_slots: vec![TimeSlot::new("9:00-10:00"), TimeSlot::new("10:00-11:00")],
        time_slot: None,
        reason: String::from("stress"),
        phone_number: String::from("09123456789"),
        is_urgent: false,
        name_optional: String::new(),
    }
}

pub fn create_test_request_form() -> TestRequestForm {
    TestRequestForm {
        date: String::from("2025-12-10"),
        preferred_slots: vec![TimeSlot::new("9:00-10:00")],
        time_slot: None,
        test_type: String::from("Aptitude Test"),
        reason: String::from("career assessment"),
        phone_number: String::from("09123456789"),
    }
}

pub fn submission_time() -> OffsetDateTime {
    datetime!(2025-12-05 08:00 UTC)
}

pub fn transition_time() -> OffsetDateTime {
    datetime!(2025-12-06 09:30 UTC)
}

/// Submits a standard appointment and returns the pending request.
pub fn create_pending_appointment() -> Request {
    let result: SubmissionResult = submit_appointment(
        &create_test_directory(),
        create_test_student(),
        create_test_appointment_form(),
        submission_time(),
    )
    .unwrap();
    result.request
}
