//! # API REST
//!
//! REST API implementation for HealthAI.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, simulated latency)
//!
//! Uses `api-shared` for request/response bodies and `healthai-core` for everything else.
//! The server acts for a single logical user: one [`Session`] is shared by all requests.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AnalyseReq, AnalyseRes, AnalyticsRes, AppointmentRes, AppointmentsRes, ChartPointRes,
    ChartSeriesRes, ChatReq, ChatRes, ChecklistItemRes, ConditionMatchRes, ConditionRes,
    ConditionsRes, DashboardRes, HealthRes, HealthService, MedicationRes, MedicationsRes,
    SymptomsRes, TreatmentRes,
};
use healthai_core::{
    analyse, plan_for, respond, views, AnalysisRequest, Catalogue, CoreConfig, HealthError,
    Session,
};

/// Error half of every handler result.
type ApiError = (StatusCode, String);

/// Application state for the REST API server
///
/// Configuration and catalogue are immutable after startup. The session is the only mutable
/// state and is never held across an `.await`.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    catalogue: Arc<Catalogue>,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    /// Create state with a session whose daily tip is chosen at random.
    pub fn new(cfg: CoreConfig, catalogue: Catalogue) -> Self {
        let session = Session::start(&catalogue, &mut rand::thread_rng());
        Self::with_session(cfg, catalogue, session)
    }

    pub fn with_session(cfg: CoreConfig, catalogue: Catalogue, session: Session) -> Self {
        Self {
            cfg: Arc::new(cfg),
            catalogue: Arc::new(catalogue),
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, ApiError> {
        self.session.lock().map_err(|_| {
            tracing::error!("session lock poisoned");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        dashboard,
        symptoms,
        conditions,
        analyse_symptoms,
        chat,
        treatment,
        appointments,
        medications,
        analytics,
    ),
    components(schemas(
        HealthRes,
        DashboardRes,
        SymptomsRes,
        ChecklistItemRes,
        ConditionsRes,
        ConditionRes,
        AnalyseReq,
        AnalyseRes,
        ConditionMatchRes,
        ChatReq,
        ChatRes,
        TreatmentRes,
        AppointmentsRes,
        AppointmentRes,
        MedicationsRes,
        MedicationRes,
        AnalyticsRes,
        ChartSeriesRes,
        ChartPointRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/symptoms", get(symptoms))
        .route("/conditions", get(conditions))
        .route("/analyse", post(analyse_symptoms))
        .route("/chat", post(chat))
        .route("/treatment/:condition", get(treatment))
        .route("/appointments", get(appointments))
        .route("/medications", get(medications))
        .route("/analytics", get(analytics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a core error to a response: caller mistakes are `400` with the message, anything
/// else is logged and reported as `500`.
fn api_error(context: &str, err: HealthError) -> ApiError {
    if err.is_validation() {
        tracing::warn!("{}: {}", context, err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("{} error: {:?}", context, err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Daily tip and summary cards", body = DashboardRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Dashboard summary: the session's daily tip, the next appointment and the medication count.
#[axum::debug_handler]
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardRes>, ApiError> {
    let session = state.session()?;
    let view = views::dashboard(&state.catalogue, session.daily_tip(), session.theme());
    Ok(Json(view.into()))
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Symptom vocabulary and checklist", body = SymptomsRes)
    )
)]
#[axum::debug_handler]
async fn symptoms(State(state): State<AppState>) -> Json<SymptomsRes> {
    Json(SymptomsRes {
        vocabulary: state
            .catalogue
            .vocabulary()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        checklist: views::checklist(&state.catalogue)
            .into_iter()
            .map(ChecklistItemRes::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "Known conditions", body = ConditionsRes)
    )
)]
#[axum::debug_handler]
async fn conditions(State(state): State<AppState>) -> Json<ConditionsRes> {
    Json(ConditionsRes {
        conditions: state
            .catalogue
            .conditions()
            .iter()
            .map(ConditionRes::from)
            .collect(),
    })
}

#[utoipa::path(
    post,
    path = "/analyse",
    request_body = AnalyseReq,
    responses(
        (status = 200, description = "Ranked matching conditions", body = AnalyseRes),
        (status = 400, description = "No symptoms supplied"),
        (status = 500, description = "Internal server error")
    )
)]
/// Analyse symptoms
///
/// Validates and scores the input, waits for the configured analysis delay, then publishes
/// the results to the session panel unless a newer analysis started meanwhile. The caller
/// always receives the results of its own request.
///
/// # Errors
/// Returns `400 Bad Request` if both `text` and `symptoms` are blank.
#[axum::debug_handler]
async fn analyse_symptoms(
    State(state): State<AppState>,
    Json(req): Json<AnalyseReq>,
) -> Result<Json<AnalyseRes>, ApiError> {
    let request = AnalysisRequest::from(req);
    let results = analyse(&request, &state.catalogue, state.cfg.detection())
        .map_err(|e| api_error("Analyse", e))?;

    let ticket = state.session()?.begin_analysis(&request);
    simulate_latency(state.cfg.delays().analysis).await;
    state.session()?.complete_analysis(ticket, results.clone());

    let outcome = views::prediction_outcome(&results, &state.catalogue);
    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Canned assistant reply", body = ChatRes),
        (status = 400, description = "Empty message"),
        (status = 500, description = "Internal server error")
    )
)]
/// Send a chat message and receive the canned reply after the configured delay.
///
/// The message and its reply enter the transcript together once the reply is ready, so
/// overlapping requests never interleave one exchange with another.
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatReq>,
) -> Result<Json<ChatRes>, ApiError> {
    let reply = respond(&req.message, &state.catalogue, state.cfg.detection())
        .map_err(|e| api_error("Chat", e))?;

    let sent_at = chrono::Local::now();
    simulate_latency(state.cfg.delays().chat).await;
    {
        let mut session = state.session()?;
        session.record_user_message(&req.message, sent_at);
        session.record_reply(&reply, chrono::Local::now());
    }

    Ok(Json(reply.into()))
}

#[utoipa::path(
    get,
    path = "/treatment/{condition}",
    params(("condition" = String, Path, description = "Condition name")),
    responses(
        (status = 200, description = "Treatment plan", body = TreatmentRes),
        (status = 400, description = "No condition selected"),
        (status = 500, description = "Internal server error")
    )
)]
/// Treatment plan for a condition, falling back to the generic plan.
#[axum::debug_handler]
async fn treatment(
    State(state): State<AppState>,
    AxumPath(condition): AxumPath<String>,
) -> Result<Json<TreatmentRes>, ApiError> {
    let plan = plan_for(&condition, &state.catalogue).map_err(|e| api_error("Treatment", e))?;

    simulate_latency(state.cfg.delays().treatment).await;
    state.session()?.set_treatment(plan.clone());

    Ok(Json(plan.into()))
}

#[utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "Upcoming appointments", body = AppointmentsRes)
    )
)]
#[axum::debug_handler]
async fn appointments(State(state): State<AppState>) -> Json<AppointmentsRes> {
    Json(AppointmentsRes {
        appointments: views::appointments(&state.catalogue)
            .items
            .into_iter()
            .map(AppointmentRes::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/medications",
    responses(
        (status = 200, description = "Current medications", body = MedicationsRes)
    )
)]
#[axum::debug_handler]
async fn medications(State(state): State<AppState>) -> Json<MedicationsRes> {
    Json(MedicationsRes {
        medications: views::medications(&state.catalogue)
            .items
            .into_iter()
            .map(MedicationRes::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/analytics",
    responses(
        (status = 200, description = "Static analytics series", body = AnalyticsRes)
    )
)]
#[axum::debug_handler]
async fn analytics(State(state): State<AppState>) -> Json<AnalyticsRes> {
    Json(AnalyticsRes {
        series: views::analytics(&state.catalogue)
            .series
            .into_iter()
            .map(ChartSeriesRes::from)
            .collect(),
    })
}
