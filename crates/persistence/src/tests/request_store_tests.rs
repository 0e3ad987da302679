// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for per-record request storage: id assignment, separate id
//! spaces, round-tripping, and update semantics.

use crate::PersistenceError;
use guidance_desk_domain::{RequestDetails, RequestKind, RequestStatus, TimeSlot};

use super::helpers::{create_test_persistence, create_test_request};

#[test]
fn test_insert_assigns_monotonically_increasing_ids() {
    let mut persistence = create_test_persistence();

    let first = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();
    let second = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 2))
        .unwrap();
    let third = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 3))
        .unwrap();

    let ids: Vec<i64> = vec![
        first.id.unwrap(),
        second.id.unwrap(),
        third.id.unwrap(),
    ];
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_appointments_and_tests_use_separate_id_spaces() {
    let mut persistence = create_test_persistence();

    let appointment = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();
    let test = persistence
        .insert_request(&create_test_request(RequestKind::PsychTest, 1))
        .unwrap();

    // Both collections start at 1 independently.
    assert_eq!(appointment.id, Some(1));
    assert_eq!(test.id, Some(1));
}

#[test]
fn test_get_round_trips_appointment_fields() {
    let mut persistence = create_test_persistence();

    let stored = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();
    let loaded = persistence
        .get_request(RequestKind::Appointment, stored.id.unwrap())
        .unwrap();

    assert_eq!(loaded, stored);
    let RequestDetails::Appointment(details) = &loaded.details else {
        panic!("expected an appointment");
    };
    assert_eq!(details.intake_form.id_no, "S2025001");
}

#[test]
fn test_get_round_trips_psych_test_fields() {
    let mut persistence = create_test_persistence();

    let stored = persistence
        .insert_request(&create_test_request(RequestKind::PsychTest, 1))
        .unwrap();
    let loaded = persistence
        .get_request(RequestKind::PsychTest, stored.id.unwrap())
        .unwrap();

    assert_eq!(loaded, stored);
}

#[test]
fn test_get_unknown_id_fails() {
    let persistence = create_test_persistence();

    let result = persistence.get_request(RequestKind::Appointment, 42);

    assert!(matches!(
        result.unwrap_err(),
        PersistenceError::RequestNotFound { id: 42, .. }
    ));
}

#[test]
fn test_update_writes_back_mutable_fields() {
    let mut persistence = create_test_persistence();

    let mut stored = persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();
    stored.status = RequestStatus::Accepted;
    stored.scheduled_date = Some(String::from("2025-12-10"));
    stored.scheduled_slot = Some(TimeSlot::new("9:00-10:00"));
    stored.note = Some(String::from("see you then"));
    stored.updated_at = String::from("2025-12-06T09:30:00Z");

    persistence.update_request(&stored).unwrap();
    let loaded = persistence
        .get_request(RequestKind::Appointment, stored.id.unwrap())
        .unwrap();

    assert_eq!(loaded.status, RequestStatus::Accepted);
    assert_eq!(loaded.scheduled_date.as_deref(), Some("2025-12-10"));
    assert_eq!(loaded.note.as_deref(), Some("see you then"));
    assert_eq!(loaded.updated_at, "2025-12-06T09:30:00Z");
    // Identity fields survive untouched.
    assert_eq!(loaded.control_number, stored.control_number);
    assert_eq!(loaded.created_at, stored.created_at);
}

#[test]
fn test_update_unknown_id_fails() {
    let mut persistence = create_test_persistence();

    let mut request = create_test_request(RequestKind::Appointment, 1);
    request.id = Some(42);

    let result = persistence.update_request(&request);

    assert!(matches!(
        result.unwrap_err(),
        PersistenceError::RequestNotFound { id: 42, .. }
    ));
}

#[test]
fn test_update_unpersisted_request_fails() {
    let mut persistence = create_test_persistence();

    let request = create_test_request(RequestKind::Appointment, 1);

    let result = persistence.update_request(&request);

    assert_eq!(result.unwrap_err(), PersistenceError::MissingRecordId);
}

#[test]
fn test_list_returns_newest_first() {
    let mut persistence = create_test_persistence();

    for stamp in 1..=3 {
        persistence
            .insert_request(&create_test_request(RequestKind::Appointment, stamp))
            .unwrap();
    }

    let listed = persistence.list_requests(RequestKind::Appointment).unwrap();

    let ids: Vec<i64> = listed.iter().filter_map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_list_is_idempotent() {
    let mut persistence = create_test_persistence();

    persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();

    let first = persistence.list_requests(RequestKind::Appointment).unwrap();
    let second = persistence.list_requests(RequestKind::Appointment).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_duplicate_control_number_is_rejected() {
    let mut persistence = create_test_persistence();

    persistence
        .insert_request(&create_test_request(RequestKind::Appointment, 1))
        .unwrap();
    let result = persistence.insert_request(&create_test_request(RequestKind::Appointment, 1));

    assert!(matches!(
        result.unwrap_err(),
        PersistenceError::DatabaseError(_)
    ));
}

#[test]
fn test_counselor_directory_round_trip_in_directory_order() {
    let mut persistence = create_test_persistence();

    let counselors = vec![
        guidance_desk_domain::CounselorProfile {
            user_id: 3,
            display_name: String::from("Dr. Ahmed Rahman"),
            college: Some(guidance_desk_domain::College::new("CICS")),
        },
        guidance_desk_domain::CounselorProfile {
            user_id: 2,
            display_name: String::from("Dr. Maria Santos"),
            college: None,
        },
    ];
    for counselor in &counselors {
        persistence.upsert_counselor(counselor).unwrap();
    }

    let listed = persistence.list_counselors().unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].user_id, 2);
    assert_eq!(listed[1].user_id, 3);
    assert_eq!(listed[1].college, Some(guidance_desk_domain::College::new("CICS")));
}

#[test]
fn test_counselor_upsert_replaces_existing_entry() {
    let mut persistence = create_test_persistence();

    persistence
        .upsert_counselor(&guidance_desk_domain::CounselorProfile {
            user_id: 2,
            display_name: String::from("Dr. Maria Santos"),
            college: None,
        })
        .unwrap();
    persistence
        .upsert_counselor(&guidance_desk_domain::CounselorProfile {
            user_id: 2,
            display_name: String::from("Dr. Maria Santos"),
            college: Some(guidance_desk_domain::College::new("COE")),
        })
        .unwrap();

    let listed = persistence.list_counselors().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].college, Some(guidance_desk_domain::College::new("COE")));
}
