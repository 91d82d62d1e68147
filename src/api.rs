// 🌐 HTTP Boundary - REST API with Axum
// "Now" is read here and passed into the engine explicitly

use crate::birth_date::BirthDate;
use crate::chart::{ChartCalculator, NumerologyChart};
use crate::detection::{DetectionFlags, DetectionReport};
use crate::error::NumerologyError;
use crate::interpretation::{ChartReading, Interpretation, InterpretationTable};
use crate::store::{self, StoredChart};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub calculator: ChartCalculator,
    pub interpretations: Arc<InterpretationTable>,
}

impl AppState {
    pub fn new(conn: Connection, calculator: ChartCalculator, interpretations: InterpretationTable) -> Self {
        AppState {
            db: Arc::new(Mutex::new(conn)),
            calculator,
            interpretations: Arc::new(interpretations),
        }
    }

    fn db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::internal("database lock poisoned"))
    }
}

// ============================================================================
// Request / response types
// ============================================================================

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub full_name: String,
    pub birth_date: String,
    /// Persist the chart for this customer when present
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub chart: NumerologyChart,
    pub methodology: String,
    pub readings: Vec<ChartReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetectionRequest {
    pub full_name: String,
    pub birth_date: String,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Stored flags are used when the request carries an email and no flags
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub flags: Option<DetectionFlags>,
}

#[derive(Debug, Deserialize)]
pub struct FlagsRequest {
    pub has_serious_life_event: bool,
    pub recorded_by: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<NumerologyError> for ApiError {
    fn from(err: NumerologyError) -> Self {
        ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/chart - Validate, calculate, optionally persist
async fn calculate(State(state): State<AppState>, Json(req): Json<ChartRequest>) -> ApiResult<ChartResponse> {
    let as_of = req.as_of.unwrap_or_else(|| Local::now().date_naive());
    let birth_date = BirthDate::validate(&req.birth_date, as_of)?;
    let chart = state.calculator.calculate_for(&req.full_name, birth_date, as_of);

    let record_id = match &req.customer_email {
        Some(email) => {
            let conn = state.db()?;
            Some(store::save_chart(&conn, email, &chart)?.record_id)
        }
        None => None,
    };

    let readings = state.interpretations.describe_chart(&chart);

    Ok(Json(ApiResponse::ok(ChartResponse {
        methodology: state.interpretations.methodology().to_string(),
        readings,
        chart,
        record_id,
    })))
}

/// POST /api/detections - Detection report for a person
async fn detect(State(state): State<AppState>, Json(req): Json<DetectionRequest>) -> ApiResult<DetectionReport> {
    let as_of = req.as_of.unwrap_or_else(|| Local::now().date_naive());
    let birth_date = BirthDate::validate(&req.birth_date, as_of)?;
    let chart = state.calculator.calculate_for(&req.full_name, birth_date, as_of);

    let flags = match (req.flags, &req.customer_email) {
        (Some(flags), _) => flags,
        (None, Some(email)) => store::get_detection_flags(&*state.db()?, email)?,
        (None, None) => DetectionFlags::default(),
    };

    let report = DetectionReport::evaluate(&chart, &flags);
    tracing::debug!(triggered = ?report.triggered(), "detection rules evaluated");
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/interpretations/:number
async fn interpretation(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> ApiResult<Interpretation> {
    state
        .interpretations
        .get(number)
        .cloned()
        .map(|i| Json(ApiResponse::ok(i)))
        .ok_or_else(|| ApiError::not_found(format!("No interpretation for {}", number)))
}

/// GET /api/customers/:email/charts
async fn customer_charts(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<StoredChart>> {
    let charts = store::get_charts_for_customer(&*state.db()?, &email)?;
    Ok(Json(ApiResponse::ok(charts)))
}

/// PUT /api/customers/:email/flags - Admin-recorded detection flags
async fn update_flags(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<FlagsRequest>,
) -> ApiResult<DetectionFlags> {
    let flags = DetectionFlags {
        has_serious_life_event: req.has_serious_life_event,
    };
    store::set_detection_flags(&*state.db()?, &email, &flags, &req.recorded_by)?;
    Ok(Json(ApiResponse::ok(flags)))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/chart", post(calculate))
        .route("/detections", post(detect))
        .route("/interpretations/:number", get(interpretation))
        .route("/customers/:email/charts", get(customer_charts))
        .route("/customers/:email/flags", put(update_flags))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

// ============================================================================
// TESTS
// ============================================================================
