// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AuthenticatedActor, SubmitAppointmentRequest, SubmitTestRequest, StudentRefDto,
    submit_appointment_request, submit_psych_test_request,
};
use guidance_desk_domain::{College, CounselorProfile, Request, Role};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn student_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(9, Role::Student)
}

pub fn counselor_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(3, Role::Counselor)
}

pub fn admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
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

pub fn create_test_student_dto() -> StudentRefDto {
    StudentRefDto {
        user_id: 9,
        display_name: String::from("Abdul Malik"),
        external_student_id: String::from("S2025001"),
        college: Some(String::from("CICS")),
    }
}

pub fn create_submit_appointment_request() -> SubmitAppointmentRequest {
    SubmitAppointmentRequest {
        actor_id: 9,
        actor_role: String::from("student"),
        student: create_test_student_dto(),
        date: String::from("2025-12-10"),
        preferred_slots: vec![String::from("9:00-10:00")],
        time_slot: None,
        reason: String::from("stress"),
        phone_number: String::from("09123456789"),
        is_urgent: false,
        name_optional: String::new(),
    }
}

pub fn create_submit_test_request() -> SubmitTestRequest {
    SubmitTestRequest {
        actor_id: 9,
        actor_role: String::from("student"),
        student: create_test_student_dto(),
        date: String::from("2025-12-10"),
        preferred_slots: vec![String::from("9:00-10:00")],
        time_slot: None,
        test_type: String::from("Psychological Test"),
        reason: String::from("assessment"),
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
    submit_appointment_request(
        &create_test_directory(),
        &student_actor(),
        create_submit_appointment_request(),
        submission_time(),
    )
    .unwrap()
    .request
}

/// Submits a standard test request and returns the pending request.
pub fn create_pending_test_request() -> Request {
    submit_psych_test_request(
        &student_actor(),
        create_submit_test_request(),
        submission_time(),
    )
    .unwrap()
    .request
}
