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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use guidance_desk::{SubmissionResult, TransitionResult};
use guidance_desk_api::{
    AcceptRequest, AnnouncementRequest, ApiError, AuthenticatedActor, NotificationListResponse,
    NotificationView, RejectRequest, RequestView, RescheduleRequest, SessionFormRequest,
    SubmitAppointmentRequest, SubmitTestRequest, TriagePolicy, UpsertCounselorRequest,
    accept_request, authenticate_stub, broadcast_announcement, emit_notification, parse_role,
    record_session_form_request, reject_request, reschedule_request, submit_appointment_request,
    submit_psych_test_request, translate_persistence_error, upsert_counselor_entry,
    visible_requests,
};
use guidance_desk_domain::{CounselorProfile, Request, RequestKind, Role};
use guidance_desk_notify::Notification;
use guidance_desk_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

/// Guidance Desk Server - HTTP server for the counseling coordination portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Scope psychological-test requests to the counselor who claimed
    /// them instead of the shared triage pool
    #[arg(long, default_value_t = false)]
    per_counselor_tests: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access; the lock also serializes writers, so every
/// operation is one atomic read-modify-write.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for requests, notifications, and counselors.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// How test requests are scoped for counselors.
    triage_policy: TriagePolicy,
}

/// Query parameters identifying the acting user on read endpoints.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The actor's portal user id.
    actor_id: i64,
    /// The actor's role.
    actor_role: String,
}

/// Query parameters for notification listings.
#[derive(Debug, Deserialize)]
struct NotificationQuery {
    /// The reading user's portal user id.
    user_id: i64,
    /// The reading user's role.
    role: String,
}

/// API request to mark every visible notification read.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReadAllRequest {
    /// The reading user's portal user id.
    user_id: i64,
    /// The reading user's role.
    role: String,
}

/// API response for write operations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Serializable representation of a counselor directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CounselorView {
    /// The counselor's portal user id.
    user_id: i64,
    /// The counselor's display name.
    display_name: String,
    /// The college this counselor serves, if scoped to one.
    college: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::SlotPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses and authenticates the acting user.
fn parse_actor(actor_id: i64, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(actor_role)?;
    authenticate_stub(actor_id, role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Handler for POST `/appointments` endpoint.
///
/// Submits a new appointment request.
async fn handle_submit_appointment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitAppointmentRequest>,
) -> Result<(StatusCode, Json<RequestView>), HttpError> {
    info!(
        actor_id = req.actor_id,
        role = %req.actor_role,
        date = %req.date,
        "Handling submit_appointment request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let persistence = app_state.persistence.lock().await;
    let directory: Vec<CounselorProfile> = persistence
        .list_counselors()
        .map_err(translate_persistence_error)?;
    drop(persistence);

    let result: SubmissionResult = submit_appointment_request(&directory, &actor, req, now)?;

    let mut persistence = app_state.persistence.lock().await;
    let stored: Request = persistence
        .insert_request(&result.request)
        .map_err(translate_persistence_error)?;
    if let Some(notification) = &result.notification {
        emit_notification(&mut *persistence, notification);
    }
    drop(persistence);

    info!(
        control_number = stored.control_number.value(),
        counselor_id = ?stored.counselor_id,
        "Successfully created appointment request"
    );

    Ok((StatusCode::CREATED, Json(RequestView::from_request(&stored))))
}

/// Handler for POST `/tests` endpoint.
///
/// Submits a new psychological-test request.
async fn handle_submit_test(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitTestRequest>,
) -> Result<(StatusCode, Json<RequestView>), HttpError> {
    info!(
        actor_id = req.actor_id,
        role = %req.actor_role,
        date = %req.date,
        "Handling submit_test request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let result: SubmissionResult = submit_psych_test_request(&actor, req, now)?;

    let mut persistence = app_state.persistence.lock().await;
    let stored: Request = persistence
        .insert_request(&result.request)
        .map_err(translate_persistence_error)?;
    if let Some(notification) = &result.notification {
        emit_notification(&mut *persistence, notification);
    }
    drop(persistence);

    info!(
        control_number = stored.control_number.value(),
        "Successfully created test request"
    );

    Ok((StatusCode::CREATED, Json(RequestView::from_request(&stored))))
}

/// The settle action carried by a settle endpoint body.
enum SettleBody {
    Accept(AcceptRequest),
    Reschedule(RescheduleRequest),
    Reject(RejectRequest),
}

impl SettleBody {
    const fn actor(&self) -> (i64, &String) {
        match self {
            Self::Accept(req) => (req.actor_id, &req.actor_role),
            Self::Reschedule(req) => (req.actor_id, &req.actor_role),
            Self::Reject(req) => (req.actor_id, &req.actor_role),
        }
    }
}

/// Loads a request, applies a settle action, persists the result, and
/// emits the student notification.
async fn apply_settle(
    app_state: &AppState,
    kind: RequestKind,
    id: i64,
    body: SettleBody,
) -> Result<Json<RequestView>, HttpError> {
    let (actor_id, actor_role) = body.actor();
    let actor: AuthenticatedActor = parse_actor(actor_id, actor_role)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let mut persistence = app_state.persistence.lock().await;
    let request: Request = persistence
        .get_request(kind, id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = match body {
        SettleBody::Accept(req) => accept_request(&actor, &request, req, now),
        SettleBody::Reschedule(req) => reschedule_request(&actor, &request, req, now),
        SettleBody::Reject(req) => reject_request(&actor, &request, req, now),
    }?;

    persistence
        .update_request(&result.request)
        .map_err(translate_persistence_error)?;
    emit_notification(&mut *persistence, &result.notification);
    drop(persistence);

    info!(
        kind = kind.as_str(),
        id,
        status = result.request.status.as_str(),
        "Successfully settled request"
    );

    Ok(Json(RequestView::from_request(&result.request)))
}

/// Handler for POST `/appointments/{id}/accept` endpoint.
async fn handle_accept_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AcceptRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::Appointment,
        id,
        SettleBody::Accept(req),
    )
    .await
}

/// Handler for POST `/appointments/{id}/reschedule` endpoint.
async fn handle_reschedule_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::Appointment,
        id,
        SettleBody::Reschedule(req),
    )
    .await
}

/// Handler for POST `/appointments/{id}/reject` endpoint.
async fn handle_reject_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::Appointment,
        id,
        SettleBody::Reject(req),
    )
    .await
}

/// Handler for POST `/tests/{id}/accept` endpoint.
async fn handle_accept_test(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AcceptRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::PsychTest,
        id,
        SettleBody::Accept(req),
    )
    .await
}

/// Handler for POST `/tests/{id}/reschedule` endpoint.
async fn handle_reschedule_test(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::PsychTest,
        id,
        SettleBody::Reschedule(req),
    )
    .await
}

/// Handler for POST `/tests/{id}/reject` endpoint.
async fn handle_reject_test(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<RequestView>, HttpError> {
    apply_settle(
        &app_state,
        RequestKind::PsychTest,
        id,
        SettleBody::Reject(req),
    )
    .await
}

/// Handler for POST `/appointments/{id}/session_form` endpoint.
///
/// Records the counselor's post-session form on an appointment.
async fn handle_session_form(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SessionFormRequest>,
) -> Result<Json<RequestView>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let mut persistence = app_state.persistence.lock().await;
    let request: Request = persistence
        .get_request(RequestKind::Appointment, id)
        .map_err(translate_persistence_error)?;

    let updated: Request = record_session_form_request(&actor, &request, req, now)?;

    persistence
        .update_request(&updated)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    info!(id, "Recorded session form");

    Ok(Json(RequestView::from_request(&updated)))
}

/// Lists requests of one kind, scoped to the acting user.
async fn list_requests_for(
    app_state: &AppState,
    kind: RequestKind,
    query: ActorQuery,
) -> Result<Json<Vec<RequestView>>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(query.actor_id, &query.actor_role)?;

    let persistence = app_state.persistence.lock().await;
    let requests: Vec<Request> = persistence
        .list_requests(kind)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    let visible: Vec<Request> = visible_requests(&actor, requests, app_state.triage_policy);
    let views: Vec<RequestView> = visible.iter().map(RequestView::from_request).collect();

    Ok(Json(views))
}

/// Handler for GET `/appointments` endpoint.
async fn handle_list_appointments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<RequestView>>, HttpError> {
    list_requests_for(&app_state, RequestKind::Appointment, query).await
}

/// Handler for GET `/tests` endpoint.
async fn handle_list_tests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<RequestView>>, HttpError> {
    list_requests_for(&app_state, RequestKind::PsychTest, query).await
}

/// Handler for POST `/counselors` endpoint.
///
/// Creates or updates a counselor directory entry.
async fn handle_upsert_counselor(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpsertCounselorRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        counselor_id = req.user_id,
        "Handling upsert_counselor request"
    );

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let counselor: CounselorProfile = upsert_counselor_entry(&actor, req)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence
        .upsert_counselor(&counselor)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!(
            "Stored counselor directory entry for user {}",
            counselor.user_id
        )),
    }))
}

/// Handler for GET `/counselors` endpoint.
async fn handle_list_counselors(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<CounselorView>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let counselors: Vec<CounselorProfile> = persistence
        .list_counselors()
        .map_err(translate_persistence_error)?;
    drop(persistence);

    let views: Vec<CounselorView> = counselors
        .into_iter()
        .map(|c| CounselorView {
            user_id: c.user_id,
            display_name: c.display_name,
            college: c.college.as_ref().map(ToString::to_string),
        })
        .collect();

    Ok(Json(views))
}

/// Handler for GET `/notifications` endpoint.
///
/// Lists the notifications visible to a user, newest first, with the
/// unread count.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<NotificationListResponse>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(query.user_id, &query.role)?;

    let persistence = app_state.persistence.lock().await;
    let notifications: Vec<Notification> = persistence
        .list_notifications_for(actor.id, actor.role)
        .map_err(translate_persistence_error)?;
    let unread_count: i64 = persistence
        .unread_notification_count(actor.id, actor.role)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(Json(NotificationListResponse {
        notifications: notifications
            .iter()
            .map(NotificationView::from_notification)
            .collect(),
        unread_count,
    }))
}

/// Handler for POST `/notifications/{id}/read` endpoint.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    persistence
        .mark_notification_read(id)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/notifications/read_all` endpoint.
async fn handle_mark_all_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ReadAllRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    let actor: AuthenticatedActor = parse_actor(req.user_id, &req.role)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence
        .mark_all_notifications_read(actor.id, actor.role)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/announcements` endpoint.
///
/// Broadcasts an announcement notification to every user.
async fn handle_broadcast_announcement(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AnnouncementRequest>,
) -> Result<(StatusCode, Json<WriteResponse>), HttpError> {
    info!(actor_id = req.actor_id, title = %req.title, "Handling announcement broadcast");

    let actor: AuthenticatedActor = parse_actor(req.actor_id, &req.actor_role)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let announcement: Notification = broadcast_announcement(&actor, req, now)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence
        .insert_notification(&announcement)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse {
            success: true,
            message: Some(String::from("Announcement broadcast to all users")),
        }),
    ))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/appointments", post(handle_submit_appointment))
        .route("/appointments", get(handle_list_appointments))
        .route("/appointments/{id}/accept", post(handle_accept_appointment))
        .route(
            "/appointments/{id}/reschedule",
            post(handle_reschedule_appointment),
        )
        .route("/appointments/{id}/reject", post(handle_reject_appointment))
        .route("/appointments/{id}/session_form", post(handle_session_form))
        .route("/tests", post(handle_submit_test))
        .route("/tests", get(handle_list_tests))
        .route("/tests/{id}/accept", post(handle_accept_test))
        .route("/tests/{id}/reschedule", post(handle_reschedule_test))
        .route("/tests/{id}/reject", post(handle_reject_test))
        .route("/counselors", post(handle_upsert_counselor))
        .route("/counselors", get(handle_list_counselors))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route(
            "/notifications/read_all",
            post(handle_mark_all_notifications_read),
        )
        .route("/announcements", post(handle_broadcast_announcement))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Guidance Desk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let triage_policy: TriagePolicy = if args.per_counselor_tests {
        TriagePolicy::PerCounselor
    } else {
        TriagePolicy::SharedPool
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        triage_policy,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode as HttpStatusCode},
    };
    use guidance_desk_api::StudentRefDto;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state(triage_policy: TriagePolicy) -> AppState {
        let persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            triage_policy,
        }
    }

    fn json_request(method: &str, uri: &str, body: String) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    /// Seeds the counselor directory with two counselors (COE and CICS).
    async fn seed_counselors(app: &Router) {
        let counselors = vec![
            UpsertCounselorRequest {
                actor_id: 1,
                actor_role: String::from("admin"),
                user_id: 2,
                display_name: String::from("Dr. Maria Santos"),
                college: Some(String::from("COE")),
            },
            UpsertCounselorRequest {
                actor_id: 1,
                actor_role: String::from("admin"),
                user_id: 3,
                display_name: String::from("Dr. Ahmed Rahman"),
                college: Some(String::from("CICS")),
            },
        ];
        for counselor in counselors {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/counselors",
                    serde_json::to_string(&counselor).unwrap(),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), HttpStatusCode::OK);
        }
    }

    fn submit_appointment_body() -> SubmitAppointmentRequest {
        SubmitAppointmentRequest {
            actor_id: 9,
            actor_role: String::from("student"),
            student: StudentRefDto {
                user_id: 9,
                display_name: String::from("Abdul Malik"),
                external_student_id: String::from("S2025001"),
                college: Some(String::from("CICS")),
            },
            date: String::from("2025-12-10"),
            preferred_slots: vec![String::from("9:00-10:00")],
            time_slot: None,
            reason: String::from("stress"),
            phone_number: String::from("09123456789"),
            is_urgent: false,
            name_optional: String::new(),
        }
    }

    fn submit_test_body() -> SubmitTestRequest {
        SubmitTestRequest {
            actor_id: 9,
            actor_role: String::from("student"),
            student: StudentRefDto {
                user_id: 9,
                display_name: String::from("Abdul Malik"),
                external_student_id: String::from("S2025001"),
                college: Some(String::from("CICS")),
            },
            date: String::from("2025-12-10"),
            preferred_slots: vec![String::from("9:00-10:00")],
            time_slot: None,
            test_type: String::from("Psychological Test"),
            reason: String::from("assessment"),
            phone_number: String::from("09123456789"),
        }
    }

    /// Submits an appointment and returns its view.
    async fn submit_appointment(app: &Router) -> RequestView {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/appointments",
                serde_json::to_string(&submit_appointment_body()).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_submit_appointment_creates_pending_request() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;

        let view: RequestView = submit_appointment(&app).await;

        assert_eq!(view.status, "pending");
        assert_eq!(view.scheduled_date, None);
        assert!(view.control_number.starts_with("APT-"));
        // The CICS student is assigned the CICS counselor.
        assert_eq!(view.counselor_id, Some(3));
        assert!(view.id > 0);
    }

    #[tokio::test]
    async fn test_submission_notifies_assigned_counselor() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        submit_appointment(&app).await;

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/notifications?user_id=3&role=counselor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let list: NotificationListResponse = read_json(response).await;
        assert_eq!(list.notifications.len(), 1);
        assert_eq!(list.notifications[0].title, "New Appointment Request");
        assert_eq!(list.unread_count, 1);
    }

    #[tokio::test]
    async fn test_submit_without_slots_returns_bad_request() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;

        let mut body = submit_appointment_body();
        body.preferred_slots = Vec::new();

        let response = app
            .oneshot(json_request(
                "POST",
                "/appointments",
                serde_json::to_string(&body).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_as_counselor_is_forbidden() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));

        let mut body = submit_appointment_body();
        body.actor_id = 3;
        body.actor_role = String::from("counselor");

        let response = app
            .oneshot(json_request(
                "POST",
                "/appointments",
                serde_json::to_string(&body).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_role_returns_bad_request() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));

        let mut body = submit_appointment_body();
        body.actor_role = String::from("dean");

        let response = app
            .oneshot(json_request(
                "POST",
                "/appointments",
                serde_json::to_string(&body).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_accept_schedules_and_notifies_student() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        let submitted: RequestView = submit_appointment(&app).await;

        let accept = AcceptRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            date: Some(String::from("2025-12-10")),
            slot: Some(String::from("9:00-10:00")),
            note: None,
        };
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/appointments/{}/accept", submitted.id),
                serde_json::to_string(&accept).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: RequestView = read_json(response).await;
        assert_eq!(view.status, "accepted");
        assert_eq!(view.scheduled_date.as_deref(), Some("2025-12-10"));
        assert_eq!(view.scheduled_slot.as_deref(), Some("9:00-10:00"));

        // The student sees the acceptance notification.
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/notifications?user_id=9&role=student")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: NotificationListResponse = read_json(response).await;
        assert_eq!(list.notifications.len(), 1);
        assert_eq!(list.notifications[0].title, "Appointment Accepted");
        assert_eq!(list.notifications[0].severity, "success");
    }

    #[tokio::test]
    async fn test_accept_unknown_id_returns_not_found() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));

        let accept = AcceptRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            date: None,
            slot: None,
            note: None,
        };
        let response = app
            .oneshot(json_request(
                "POST",
                "/appointments/42/accept",
                serde_json::to_string(&accept).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_settling_a_rejected_request_returns_conflict() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        let submitted: RequestView = submit_appointment(&app).await;

        let reject = RejectRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            note: Some(String::from("unavailable")),
        };
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/appointments/{}/reject", submitted.id),
                serde_json::to_string(&reject).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: RequestView = read_json(response).await;
        assert_eq!(view.status, "rejected");
        assert_eq!(view.scheduled_date, None);

        let accept = AcceptRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            date: None,
            slot: None,
            note: None,
        };
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/appointments/{}/accept", submitted.id),
                serde_json::to_string(&accept).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_reschedule_requires_date() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        let submitted: RequestView = submit_appointment(&app).await;

        let reschedule = RescheduleRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            date: String::new(),
            slot: String::from("1:00-2:00"),
            note: None,
        };
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/appointments/{}/reschedule", submitted.id),
                serde_json::to_string(&reschedule).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shared_test_pool_visible_to_any_counselor() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tests",
                serde_json::to_string(&submit_test_body()).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        let submitted: RequestView = read_json(response).await;
        assert!(submitted.control_number.starts_with("PT-"));
        assert_eq!(submitted.counselor_id, None);

        // A counselor with no assignment still sees the test request.
        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/tests?actor_id=2&actor_role=counselor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed: Vec<RequestView> = read_json(response).await;
        assert_eq!(listed.len(), 1);

        // Accepting claims the request for the acting counselor.
        let accept = AcceptRequest {
            actor_id: 2,
            actor_role: String::from("counselor"),
            date: None,
            slot: None,
            note: None,
        };
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/tests/{}/accept", submitted.id),
                serde_json::to_string(&accept).unwrap(),
            ))
            .await
            .unwrap();
        let view: RequestView = read_json(response).await;
        assert_eq!(view.counselor_id, Some(2));
        assert_eq!(view.status, "accepted");
    }

    #[tokio::test]
    async fn test_student_listing_is_scoped_to_own_requests() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        submit_appointment(&app).await;

        let own = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/appointments?actor_id=9&actor_role=student")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let own_list: Vec<RequestView> = read_json(own).await;
        assert_eq!(own_list.len(), 1);

        let other = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/appointments?actor_id=10&actor_role=student")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let other_list: Vec<RequestView> = read_json(other).await;
        assert_eq!(other_list.len(), 0);
    }

    #[tokio::test]
    async fn test_mark_all_notifications_read() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        submit_appointment(&app).await;

        let read_all = ReadAllRequest {
            user_id: 3,
            role: String::from("counselor"),
        };
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/notifications/read_all",
                serde_json::to_string(&read_all).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/notifications?user_id=3&role=counselor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: NotificationListResponse = read_json(response).await;
        assert_eq!(list.unread_count, 0);
        assert!(list.notifications.iter().all(|n| n.read));
    }

    #[tokio::test]
    async fn test_announcement_reaches_every_role() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));

        let announcement = AnnouncementRequest {
            actor_id: 1,
            actor_role: String::from("admin"),
            title: String::from("Midterm advisory"),
            message: String::from("The counseling office is open all week."),
            link: None,
        };
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/announcements",
                serde_json::to_string(&announcement).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);

        for (user_id, role) in [(9, "student"), (3, "counselor"), (6, "college_rep")] {
            let response = app
                .clone()
                .oneshot(
                    HttpRequest::builder()
                        .method("GET")
                        .uri(format!("/notifications?user_id={user_id}&role={role}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let list: NotificationListResponse = read_json(response).await;
            assert_eq!(list.notifications.len(), 1, "role {role} should see it");
        }
    }

    #[tokio::test]
    async fn test_announcement_as_student_is_forbidden() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));

        let announcement = AnnouncementRequest {
            actor_id: 9,
            actor_role: String::from("student"),
            title: String::from("hello"),
            message: String::from("world"),
            link: None,
        };
        let response = app
            .oneshot(json_request(
                "POST",
                "/announcements",
                serde_json::to_string(&announcement).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_session_form_is_recorded_on_appointment() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::SharedPool));
        seed_counselors(&app).await;
        let submitted: RequestView = submit_appointment(&app).await;
        assert_eq!(submitted.has_session_form, Some(false));

        let session_form = SessionFormRequest {
            actor_id: 3,
            actor_role: String::from("counselor"),
            form: serde_json::json!({"remarks": "initial session complete"}),
        };
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/appointments/{}/session_form", submitted.id),
                serde_json::to_string(&session_form).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: RequestView = read_json(response).await;
        assert_eq!(view.has_session_form, Some(true));
        assert_eq!(view.status, "pending");
    }

    #[tokio::test]
    async fn test_per_counselor_policy_hides_claimed_tests() {
        let app: Router = build_router(create_test_app_state(TriagePolicy::PerCounselor));
        seed_counselors(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tests",
                serde_json::to_string(&submit_test_body()).unwrap(),
            ))
            .await
            .unwrap();
        let submitted: RequestView = read_json(response).await;

        let accept = AcceptRequest {
            actor_id: 2,
            actor_role: String::from("counselor"),
            date: None,
            slot: None,
            note: None,
        };
        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/tests/{}/accept", submitted.id),
                serde_json::to_string(&accept).unwrap(),
            ))
            .await
            .unwrap();

        // The claiming counselor still sees it; another counselor does not.
        let mine = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/tests?actor_id=2&actor_role=counselor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let mine_list: Vec<RequestView> = read_json(mine).await;
        assert_eq!(mine_list.len(), 1);

        let other = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/tests?actor_id=3&actor_role=counselor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let other_list: Vec<RequestView> = read_json(other).await;
        assert_eq!(other_list.len(), 0);
    }
}
