// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-record request storage.
//!
//! Appointments and psych tests live in separate tables with separate
//! id spaces. Rows are read into raw row structs first and converted to
//! domain values outside the driver closure, so reconstruction failures
//! surface as persistence errors rather than driver errors.

use crate::SqlitePersistence;
use crate::error::PersistenceError;
use guidance_desk_domain::{
    AppointmentDetails, College, ControlNumber, IntakeFormSnapshot, PsychTestDetails, Request,
    RequestDetails, RequestKind, RequestStatus, StudentRef, TimeSlot,
};
use rusqlite::{Row, params};
use tracing::debug;

const fn table_name(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Appointment => "appointments",
        RequestKind::PsychTest => "psych_tests",
    }
}

/// Raw appointment row, column-for-column.
struct AppointmentRow {
    id: i64,
    control_number: String,
    status: String,
    student_user_id: i64,
    student_name: String,
    student_external_id: String,
    student_college: Option<String>,
    counselor_id: Option<i64>,
    requested_date: String,
    requested_slots: String,
    scheduled_date: Option<String>,
    scheduled_slot: Option<String>,
    note: Option<String>,
    is_urgent: bool,
    reason: String,
    phone_number: String,
    intake_form: String,
    session_form: Option<String>,
    created_at: String,
    updated_at: String,
}

impl AppointmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            control_number: row.get(1)?,
            status: row.get(2)?,
            student_user_id: row.get(3)?,
            student_name: row.get(4)?,
            student_external_id: row.get(5)?,
            student_college: row.get(6)?,
            counselor_id: row.get(7)?,
            requested_date: row.get(8)?,
            requested_slots: row.get(9)?,
            scheduled_date: row.get(10)?,
            scheduled_slot: row.get(11)?,
            note: row.get(12)?,
            is_urgent: row.get(13)?,
            reason: row.get(14)?,
            phone_number: row.get(15)?,
            intake_form: row.get(16)?,
            session_form: row.get(17)?,
            created_at: row.get(18)?,
            updated_at: row.get(19)?,
        })
    }

    fn into_request(self) -> Result<Request, PersistenceError> {
        let intake_form: IntakeFormSnapshot = serde_json::from_str(&self.intake_form)?;
        let session_form: Option<serde_json::Value> = self
            .session_form
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Request {
            id: Some(self.id),
            control_number: ControlNumber::from_value(&self.control_number),
            status: parse_status(&self.status)?,
            student: StudentRef {
                user_id: self.student_user_id,
                display_name: self.student_name,
                external_student_id: self.student_external_id,
                college: self
                    .student_college
                    .as_deref()
                    .map(College::new),
            },
            counselor_id: self.counselor_id,
            requested_date: self.requested_date,
            requested_slots: serde_json::from_str(&self.requested_slots)?,
            scheduled_date: self.scheduled_date,
            scheduled_slot: self.scheduled_slot.as_deref().map(TimeSlot::new),
            note: self.note,
            created_at: self.created_at,
            updated_at: self.updated_at,
            details: RequestDetails::Appointment(AppointmentDetails {
                is_urgent: self.is_urgent,
                reason: self.reason,
                phone_number: self.phone_number,
                intake_form,
                session_form,
            }),
        })
    }
}

/// Raw psych-test row, column-for-column.
struct PsychTestRow {
    id: i64,
    control_number: String,
    status: String,
    student_user_id: i64,
    student_name: String,
    student_external_id: String,
    student_college: Option<String>,
    counselor_id: Option<i64>,
    requested_date: String,
    requested_slots: String,
    scheduled_date: Option<String>,
    scheduled_slot: Option<String>,
    note: Option<String>,
    test_type: String,
    reason: String,
    phone_number: String,
    created_at: String,
    updated_at: String,
}

impl PsychTestRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            control_number: row.get(1)?,
            status: row.get(2)?,
            student_user_id: row.get(3)?,
            student_name: row.get(4)?,
            student_external_id: row.get(5)?,
            student_college: row.get(6)?,
            counselor_id: row.get(7)?,
            requested_date: row.get(8)?,
            requested_slots: row.get(9)?,
            scheduled_date: row.get(10)?,
            scheduled_slot: row.get(11)?,
            note: row.get(12)?,
            test_type: row.get(13)?,
            reason: row.get(14)?,
            phone_number: row.get(15)?,
            created_at: row.get(16)?,
            updated_at: row.get(17)?,
        })
    }

    fn into_request(self) -> Result<Request, PersistenceError> {
        Ok(Request {
            id: Some(self.id),
            control_number: ControlNumber::from_value(&self.control_number),
            status: parse_status(&self.status)?,
            student: StudentRef {
                user_id: self.student_user_id,
                display_name: self.student_name,
                external_student_id: self.student_external_id,
                college: self
                    .student_college
                    .as_deref()
                    .map(College::new),
            },
            counselor_id: self.counselor_id,
            requested_date: self.requested_date,
            requested_slots: serde_json::from_str(&self.requested_slots)?,
            scheduled_date: self.scheduled_date,
            scheduled_slot: self.scheduled_slot.as_deref().map(TimeSlot::new),
            note: self.note,
            created_at: self.created_at,
            updated_at: self.updated_at,
            details: RequestDetails::PsychTest(PsychTestDetails {
                test_type: self.test_type,
                reason: self.reason,
                phone_number: self.phone_number,
            }),
        })
    }
}

fn parse_status(status: &str) -> Result<RequestStatus, PersistenceError> {
    status
        .parse::<RequestStatus>()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

const APPOINTMENT_COLUMNS: &str = "id, control_number, status, student_user_id, student_name, \
     student_external_id, student_college, counselor_id, requested_date, requested_slots, \
     scheduled_date, scheduled_slot, note, is_urgent, reason, phone_number, intake_form, \
     session_form, created_at, updated_at";

const PSYCH_TEST_COLUMNS: &str = "id, control_number, status, student_user_id, student_name, \
     student_external_id, student_college, counselor_id, requested_date, requested_slots, \
     scheduled_date, scheduled_slot, note, test_type, reason, phone_number, \
     created_at, updated_at";

impl SqlitePersistence {
    /// Inserts a new request and returns it with its assigned id.
    ///
    /// Ids are assigned by the database and are monotonic within each
    /// request kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the record cannot be
    /// serialized.
    pub fn insert_request(&mut self, request: &Request) -> Result<Request, PersistenceError> {
        let slots: String = serde_json::to_string(&request.requested_slots)?;
        let college: Option<String> = request.student.college.as_ref().map(ToString::to_string);

        match &request.details {
            RequestDetails::Appointment(details) => {
                let intake_form: String = serde_json::to_string(&details.intake_form)?;
                let session_form: Option<String> = details
                    .session_form
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;

                self.conn().execute(
                    "INSERT INTO appointments (control_number, status, student_user_id, \
                     student_name, student_external_id, student_college, counselor_id, \
                     requested_date, requested_slots, scheduled_date, scheduled_slot, note, \
                     is_urgent, reason, phone_number, intake_form, session_form, created_at, \
                     updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                     ?16, ?17, ?18, ?19)",
                    params![
                        request.control_number.value(),
                        request.status.as_str(),
                        request.student.user_id,
                        request.student.display_name,
                        request.student.external_student_id,
                        college,
                        request.counselor_id,
                        request.requested_date,
                        slots,
                        request.scheduled_date,
                        request.scheduled_slot.as_ref().map(ToString::to_string),
                        request.note,
                        details.is_urgent,
                        details.reason,
                        details.phone_number,
                        intake_form,
                        session_form,
                        request.created_at,
                        request.updated_at,
                    ],
                )?;
            }
            RequestDetails::PsychTest(details) => {
                self.conn().execute(
                    "INSERT INTO psych_tests (control_number, status, student_user_id, \
                     student_name, student_external_id, student_college, counselor_id, \
                     requested_date, requested_slots, scheduled_date, scheduled_slot, note, \
                     test_type, reason, phone_number, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                     ?16, ?17)",
                    params![
                        request.control_number.value(),
                        request.status.as_str(),
                        request.student.user_id,
                        request.student.display_name,
                        request.student.external_student_id,
                        college,
                        request.counselor_id,
                        request.requested_date,
                        slots,
                        request.scheduled_date,
                        request.scheduled_slot.as_ref().map(ToString::to_string),
                        request.note,
                        details.test_type,
                        details.reason,
                        details.phone_number,
                        request.created_at,
                        request.updated_at,
                    ],
                )?;
            }
        }

        let id: i64 = self.conn().last_insert_rowid();
        debug!(
            kind = request.kind().as_str(),
            id,
            control_number = request.control_number.value(),
            "Inserted request"
        );

        let mut stored: Request = request.clone();
        stored.id = Some(id);
        Ok(stored)
    }

    /// Loads a request by kind and id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RequestNotFound` if no such row exists.
    pub fn get_request(&self, kind: RequestKind, id: i64) -> Result<Request, PersistenceError> {
        let not_found = |e: rusqlite::Error| match e {
            rusqlite::Error::QueryReturnedNoRows => PersistenceError::RequestNotFound {
                kind: kind.as_str().to_string(),
                id,
            },
            other => PersistenceError::DatabaseError(other.to_string()),
        };

        match kind {
            RequestKind::Appointment => {
                let sql: String =
                    format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1");
                let row: AppointmentRow = self
                    .conn()
                    .query_row(&sql, params![id], AppointmentRow::from_row)
                    .map_err(not_found)?;
                row.into_request()
            }
            RequestKind::PsychTest => {
                let sql: String =
                    format!("SELECT {PSYCH_TEST_COLUMNS} FROM psych_tests WHERE id = ?1");
                let row: PsychTestRow = self
                    .conn()
                    .query_row(&sql, params![id], PsychTestRow::from_row)
                    .map_err(not_found)?;
                row.into_request()
            }
        }
    }

    /// Writes back the mutable fields of an already-persisted request,
    /// including its refreshed `updated_at`.
    ///
    /// Identity fields (control number, student snapshot, requested
    /// date/slots, creation time) are immutable and never rewritten.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MissingRecordId` if the request has no
    /// id, or `PersistenceError::RequestNotFound` if the row is gone.
    pub fn update_request(&mut self, request: &Request) -> Result<(), PersistenceError> {
        let id: i64 = request.id.ok_or(PersistenceError::MissingRecordId)?;
        let kind: RequestKind = request.kind();

        let affected: usize = match &request.details {
            RequestDetails::Appointment(details) => {
                let session_form: Option<String> = details
                    .session_form
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;
                self.conn().execute(
                    "UPDATE appointments SET status = ?1, counselor_id = ?2, \
                     scheduled_date = ?3, scheduled_slot = ?4, note = ?5, session_form = ?6, \
                     updated_at = ?7 WHERE id = ?8",
                    params![
                        request.status.as_str(),
                        request.counselor_id,
                        request.scheduled_date,
                        request.scheduled_slot.as_ref().map(ToString::to_string),
                        request.note,
                        session_form,
                        request.updated_at,
                        id,
                    ],
                )?
            }
            RequestDetails::PsychTest(_) => self.conn().execute(
                "UPDATE psych_tests SET status = ?1, counselor_id = ?2, scheduled_date = ?3, \
                 scheduled_slot = ?4, note = ?5, updated_at = ?6 WHERE id = ?7",
                params![
                    request.status.as_str(),
                    request.counselor_id,
                    request.scheduled_date,
                    request.scheduled_slot.as_ref().map(ToString::to_string),
                    request.note,
                    request.updated_at,
                    id,
                ],
            )?,
        };

        if affected == 0 {
            return Err(PersistenceError::RequestNotFound {
                kind: kind.as_str().to_string(),
                id,
            });
        }

        debug!(kind = kind.as_str(), id, status = request.status.as_str(), "Updated request");
        Ok(())
    }

    /// Lists all requests of a kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be
    /// reconstructed.
    pub fn list_requests(&self, kind: RequestKind) -> Result<Vec<Request>, PersistenceError> {
        let sql: String = format!(
            "SELECT {} FROM {} ORDER BY id DESC",
            match kind {
                RequestKind::Appointment => APPOINTMENT_COLUMNS,
                RequestKind::PsychTest => PSYCH_TEST_COLUMNS,
            },
            table_name(kind)
        );
        let mut stmt = self.conn().prepare(&sql)?;

        match kind {
            RequestKind::Appointment => {
                let rows = stmt.query_map([], AppointmentRow::from_row)?;
                rows.map(|row| row.map_err(PersistenceError::from)?.into_request())
                    .collect()
            }
            RequestKind::PsychTest => {
                let rows = stmt.query_map([], PsychTestRow::from_row)?;
                rows.map(|row| row.map_err(PersistenceError::from)?.into_request())
                    .collect()
            }
        }
    }
}
