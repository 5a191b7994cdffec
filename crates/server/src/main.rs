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
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use edu_report_api::request_response::{
    ChartSeriesRequest, ChartSeriesResponse, CreateAccountRequest, CreateAccountResponse,
    CreateReportRequest, CreateReportResponse, DeleteReportRequest, DeleteReportResponse,
    ListSchoolsResponse, LoginRequest, LoginResponse, OverdueRemindersResponse,
    RegionDashboardRequest, RegionDashboardResponse, SchoolDashboardRequest,
    SchoolDashboardResponse, SchoolDto, SubmitReportRequest, SubmitReportResponse,
    UpdateReportSectionsRequest, UpdateReportSectionsResponse, WhoAmIResponse,
};
use edu_report_api::{ApiError, TtlCache, handlers};
use edu_report_persistence::Persistence;

mod session;
use session::SessionActor;

/// How long the schools overview may be served from cache.
const SCHOOLS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Education Report Server - HTTP server for the education reporting system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer and the schools cache each sit behind a mutex
/// so handlers can run concurrently.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The TTL cache backing the schools overview.
    schools_cache: Arc<Mutex<TtlCache<Vec<SchoolDto>>>>,
}

/// Query parameters for the single-school dashboard.
#[derive(Debug, Deserialize)]
struct SchoolDashboardQuery {
    /// The school to report on.
    school_id: i64,
}

/// Query parameters for the per-region dashboard.
#[derive(Debug, Deserialize)]
struct RegionDashboardQuery {
    /// The region to report on.
    region_id: i64,
}

/// API response for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    /// Success indicator.
    success: bool,
    /// A human-readable message.
    message: String,
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
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Route handlers
// ============================================================================

/// Handler for POST `/api/login` endpoint.
async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");

    let mut persistence = state.persistence.lock().await;
    let response: LoginResponse =
        handlers::login(&mut persistence, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/logout` endpoint.
async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, token): SessionActor,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(login_name = %actor.login_name, "Handling logout request");

    let mut persistence = state.persistence.lock().await;
    handlers::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(MessageResponse {
        success: true,
        message: String::from("Logged out"),
    }))
}

/// Handler for GET `/api/whoami` endpoint.
async fn handle_whoami(SessionActor(actor, _): SessionActor) -> Json<WhoAmIResponse> {
    Json(handlers::who_am_i(&actor))
}

/// Handler for POST `/api/reports` endpoint.
async fn handle_create_report(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<CreateReportRequest>,
) -> Result<Json<CreateReportResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        school_id = req.school_id,
        month = req.month,
        year = req.year,
        "Handling create_report request"
    );

    let mut persistence = state.persistence.lock().await;
    let response: CreateReportResponse = handlers::create_report(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/reports/sections` endpoint.
async fn handle_update_sections(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<UpdateReportSectionsRequest>,
) -> Result<Json<UpdateReportSectionsResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        report_id = req.report_id,
        "Handling update_report_sections request"
    );

    let mut persistence = state.persistence.lock().await;
    let response: UpdateReportSectionsResponse =
        handlers::update_report_sections(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/reports/submit` endpoint.
async fn handle_submit_report(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<SubmitReportRequest>,
) -> Result<Json<SubmitReportResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        report_id = req.report_id,
        "Handling submit_report request"
    );

    let mut persistence = state.persistence.lock().await;
    let response: SubmitReportResponse = handlers::submit_report(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/reports/delete` endpoint.
async fn handle_delete_report(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<DeleteReportRequest>,
) -> Result<Json<DeleteReportResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        report_id = req.report_id,
        "Handling delete_report request"
    );

    let mut persistence = state.persistence.lock().await;
    let response: DeleteReportResponse = handlers::delete_report(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/dashboard/school` endpoint.
async fn handle_school_dashboard(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Query(query): Query<SchoolDashboardQuery>,
) -> Result<Json<SchoolDashboardResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        school_id = query.school_id,
        "Handling school_dashboard request"
    );

    let request: SchoolDashboardRequest = SchoolDashboardRequest {
        school_id: query.school_id,
    };

    let mut persistence = state.persistence.lock().await;
    let response: SchoolDashboardResponse = handlers::school_dashboard(
        &mut persistence,
        &actor,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/dashboard/region` endpoint.
async fn handle_region_dashboard(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Query(query): Query<RegionDashboardQuery>,
) -> Result<Json<RegionDashboardResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        region_id = query.region_id,
        "Handling region_dashboard request"
    );

    let request: RegionDashboardRequest = RegionDashboardRequest {
        region_id: query.region_id,
    };

    let mut persistence = state.persistence.lock().await;
    let response: RegionDashboardResponse = handlers::region_dashboard(
        &mut persistence,
        &actor,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/charts/{school_id}/{year}` endpoint.
async fn handle_chart_series(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path((school_id, year)): Path<(i64, i32)>,
) -> Result<Json<ChartSeriesResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        school_id = school_id,
        year = year,
        "Handling chart_series request"
    );

    let request: ChartSeriesRequest = ChartSeriesRequest { school_id, year };

    let mut persistence = state.persistence.lock().await;
    let response: ChartSeriesResponse =
        handlers::chart_series(&mut persistence, &actor, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/reminders` endpoint.
async fn handle_overdue_reminders(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> Result<Json<OverdueRemindersResponse>, HttpError> {
    info!(login_name = %actor.login_name, "Handling overdue_reminders request");

    let mut persistence = state.persistence.lock().await;
    let response: OverdueRemindersResponse =
        handlers::overdue_reminders(&mut persistence, &actor, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/schools` endpoint.
async fn handle_list_schools(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> Result<Json<ListSchoolsResponse>, HttpError> {
    info!(login_name = %actor.login_name, "Handling list_schools request");

    let mut persistence = state.persistence.lock().await;
    let mut cache = state.schools_cache.lock().await;
    let response: ListSchoolsResponse =
        handlers::list_schools(&mut persistence, &actor, &mut cache, Instant::now())?;
    drop(cache);
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/export/statuses` endpoint.
async fn handle_export_statuses(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> Result<Response, HttpError> {
    info!(login_name = %actor.login_name, "Handling export_statuses request");

    let mut persistence = state.persistence.lock().await;
    let csv: String =
        handlers::export_statuses_csv(&mut persistence, &actor, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], csv).into_response())
}

/// Handler for POST `/api/accounts` endpoint.
async fn handle_create_account(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<CreateAccountResponse>, HttpError> {
    info!(
        login_name = %actor.login_name,
        new_login = %req.login_name,
        role = %req.role,
        "Handling create_account request"
    );

    let mut persistence = state.persistence.lock().await;
    let response: CreateAccountResponse =
        handlers::create_account(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/whoami", get(handle_whoami))
        .route("/api/reports", post(handle_create_report))
        .route("/api/reports/sections", post(handle_update_sections))
        .route("/api/reports/submit", post(handle_submit_report))
        .route("/api/reports/delete", post(handle_delete_report))
        .route("/api/dashboard/school", get(handle_school_dashboard))
        .route("/api/dashboard/region", get(handle_region_dashboard))
        .route("/api/charts/{school_id}/{year}", get(handle_chart_series))
        .route("/api/reminders", post(handle_overdue_reminders))
        .route("/api/schools", get(handle_list_schools))
        .route("/api/export/statuses", get(handle_export_statuses))
        .route("/api/accounts", post(handle_create_account))
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

    info!("Initializing Education Report Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        schools_cache: Arc::new(Mutex::new(TtlCache::new(SCHOOLS_CACHE_TTL))),
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
