// Copyright (C) 2026 Revisa Contributors
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
use revisa_api::{
    ApiError, AvailableSlotsRequest, AvailableSlotsResponse, BranchScheduleResponse,
    CreateInspectionRequest, CreateInspectionResponse, GetInspectionResponse,
    ListInspectionsResponse, MechanicScheduleResponse, PendingNotificationsResponse,
    PutBranchScheduleRequest, PutMechanicScheduleRequest, PutScheduleResponse,
    SchedulingCoordinator, TransitionInspectionRequest, TransitionInspectionResponse, handlers,
};
use revisa_events::{NotificationDispatcher, RecordingDispatcher};
use revisa_store::{InspectionRepository, InspectionStore, ReservationStore, ScheduleStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{error, info};

/// Revisa Server - HTTP server for the vehicle inspection engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Minutes a slot reservation survives before the sweep reclaims it
    #[arg(long, default_value_t = 5)]
    reservation_ttl_minutes: i64,

    /// Seconds between reservation expiry sweeps
    #[arg(long, default_value_t = 60)]
    sweep_interval_seconds: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The scheduling coordinator over the in-memory stores.
    coordinator: Arc<SchedulingCoordinator>,
    /// The dispatcher backing the pull-based notification query.
    dispatcher: Arc<RecordingDispatcher>,
    /// The reservation store, swept periodically for expired claims.
    reservations: Arc<ReservationStore>,
}

impl AppState {
    /// Builds the application state with empty in-memory stores.
    fn new() -> Self {
        let schedules: Arc<ScheduleStore> = Arc::new(ScheduleStore::new());
        let reservations: Arc<ReservationStore> = Arc::new(ReservationStore::new());
        let inspections: Arc<dyn InspectionRepository> = Arc::new(InspectionStore::new());
        let dispatcher: Arc<RecordingDispatcher> = Arc::new(RecordingDispatcher::new());
        let sink: Arc<dyn NotificationDispatcher> = Arc::<RecordingDispatcher>::clone(&dispatcher);
        let coordinator: SchedulingCoordinator =
            SchedulingCoordinator::new(schedules, Arc::clone(&reservations), inspections, sink);

        Self {
            coordinator: Arc::new(coordinator),
            dispatcher,
            reservations,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Whether the caller should refresh their view and retry.
    retryable: bool,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Whether the caller should refresh their view and retry.
    retryable: bool,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            retryable: self.retryable,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let retryable: bool = err.is_retryable();
        let status: StatusCode = match err {
            ApiError::SlotUnavailable { .. }
            | ApiError::TransitionNotAllowed { .. }
            | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::AlreadyRated => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
            retryable,
        }
    }
}

/// Query parameters for the available-slots endpoint.
#[derive(Debug, Deserialize)]
struct AvailableSlotsQuery {
    /// The date to compute slots for (ISO 8601).
    date: Date,
    /// The branch identifier.
    branch_id: i64,
    /// The mechanic's user identifier (optional).
    mechanic_id: Option<i64>,
    /// The availability mode: `display` or `booking`.
    mode: String,
}

/// Query parameters for listing inspections.
#[derive(Debug, Deserialize)]
struct ListInspectionsQuery {
    /// List by requester.
    requester_id: Option<i64>,
    /// List by assigned mechanic.
    mechanic_id: Option<i64>,
}

/// Handler for GET `/branches/{branch_id}/schedule`.
async fn handle_get_branch_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(branch_id): Path<i64>,
) -> Result<Json<BranchScheduleResponse>, HttpError> {
    let response: BranchScheduleResponse =
        handlers::get_branch_schedule(&app_state.coordinator, branch_id)?;
    Ok(Json(response))
}

/// Handler for PUT `/branches/{branch_id}/schedule`.
async fn handle_put_branch_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(branch_id): Path<i64>,
    Json(request): Json<PutBranchScheduleRequest>,
) -> Json<PutScheduleResponse> {
    Json(handlers::put_branch_schedule(
        &app_state.coordinator,
        branch_id,
        request,
    ))
}

/// Handler for GET `/mechanics/{mechanic_id}/schedule`.
async fn handle_get_mechanic_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(mechanic_id): Path<i64>,
) -> Result<Json<MechanicScheduleResponse>, HttpError> {
    let response: MechanicScheduleResponse =
        handlers::get_mechanic_schedule(&app_state.coordinator, mechanic_id)?;
    Ok(Json(response))
}

/// Handler for PUT `/mechanics/{mechanic_id}/schedule`.
async fn handle_put_mechanic_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(mechanic_id): Path<i64>,
    Json(request): Json<PutMechanicScheduleRequest>,
) -> Json<PutScheduleResponse> {
    Json(handlers::put_mechanic_schedule(
        &app_state.coordinator,
        mechanic_id,
        request,
    ))
}

/// Handler for GET `/slots`.
async fn handle_available_slots(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, HttpError> {
    let request: AvailableSlotsRequest = AvailableSlotsRequest {
        date: query.date,
        branch_id: query.branch_id,
        mechanic_id: query.mechanic_id,
        mode: query.mode,
    };
    let response: AvailableSlotsResponse =
        handlers::compute_available_slots(&app_state.coordinator, &request)?;
    Ok(Json(response))
}

/// Handler for POST `/inspections`.
async fn handle_create_inspection(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateInspectionRequest>,
) -> Result<Json<CreateInspectionResponse>, HttpError> {
    let response: CreateInspectionResponse =
        handlers::create_inspection(&app_state.coordinator, request)?;
    Ok(Json(response))
}

/// Handler for POST `/inspections/{inspection_id}/transition`.
async fn handle_transition_inspection(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
    Json(request): Json<TransitionInspectionRequest>,
) -> Result<Json<TransitionInspectionResponse>, HttpError> {
    let response: TransitionInspectionResponse =
        handlers::transition_inspection(&app_state.coordinator, inspection_id, request)?;
    Ok(Json(response))
}

/// Handler for GET `/inspections/{inspection_id}`.
async fn handle_get_inspection(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
) -> Result<Json<GetInspectionResponse>, HttpError> {
    let response: GetInspectionResponse =
        handlers::get_inspection(&app_state.coordinator, inspection_id)?;
    Ok(Json(response))
}

/// Handler for GET `/inspections`.
///
/// Exactly one of `requester_id` and `mechanic_id` selects the listing
/// scope.
async fn handle_list_inspections(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListInspectionsQuery>,
) -> Result<Json<ListInspectionsResponse>, HttpError> {
    let response: ListInspectionsResponse = match (query.requester_id, query.mechanic_id) {
        (Some(requester_id), None) => {
            handlers::list_inspections_for_requester(&app_state.coordinator, requester_id)
        }
        (None, Some(mechanic_id)) => {
            handlers::list_inspections_for_mechanic(&app_state.coordinator, mechanic_id)
        }
        _ => {
            return Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: String::from(
                    "Exactly one of requester_id and mechanic_id must be given",
                ),
                retryable: false,
            });
        }
    };
    Ok(Json(response))
}

/// Handler for GET `/notifications/{recipient_id}`.
async fn handle_pending_notifications(
    AxumState(app_state): AxumState<AppState>,
    Path(recipient_id): Path<i64>,
) -> Json<PendingNotificationsResponse> {
    Json(handlers::pending_notifications(
        &app_state.dispatcher,
        recipient_id,
    ))
}

/// Handler for POST `/notifications/{recipient_id}/acknowledge`.
async fn handle_acknowledge_notifications(
    AxumState(app_state): AxumState<AppState>,
    Path(recipient_id): Path<i64>,
) -> StatusCode {
    handlers::acknowledge_notifications(&app_state.dispatcher, recipient_id);
    StatusCode::NO_CONTENT
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/branches/{branch_id}/schedule",
            get(handle_get_branch_schedule).put(handle_put_branch_schedule),
        )
        .route(
            "/mechanics/{mechanic_id}/schedule",
            get(handle_get_mechanic_schedule).put(handle_put_mechanic_schedule),
        )
        .route("/slots", get(handle_available_slots))
        .route("/inspections", post(handle_create_inspection))
        .route("/inspections", get(handle_list_inspections))
        .route("/inspections/{inspection_id}", get(handle_get_inspection))
        .route(
            "/inspections/{inspection_id}/transition",
            post(handle_transition_inspection),
        )
        .route(
            "/notifications/{recipient_id}",
            get(handle_pending_notifications),
        )
        .route(
            "/notifications/{recipient_id}/acknowledge",
            post(handle_acknowledge_notifications),
        )
        .with_state(app_state)
}

/// Periodically sweeps expired reservations back into the pool.
async fn sweep_loop(reservations: Arc<ReservationStore>, ttl: time::Duration, every_seconds: u64) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(every_seconds));
    loop {
        interval.tick().await;
        let expired: usize = reservations.sweep_expired(OffsetDateTime::now_utc(), ttl);
        if expired > 0 {
            info!(expired, "swept expired reservations");
        }
    }
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

    info!("Initializing Revisa Server");

    let app_state: AppState = AppState::new();

    // Background reservation expiry sweep
    let ttl: time::Duration = time::Duration::minutes(args.reservation_ttl_minutes);
    tokio::spawn(sweep_loop(
        Arc::clone(&app_state.reservations),
        ttl,
        args.sweep_interval_seconds,
    ));

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
