//! Axum route handlers for the persona quiz HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`          — Returns `{"status": "ok", "version": "0.1.0"}`
//! - `GET  /questions`       — `{"count": 16, "axes": [...], "questions": [...]}`
//! - `GET  /personas`        — `{"count": 10, "personas": [...]}`
//! - `GET  /personas/:slug`  — A single profile, 404 for an unknown slug
//! - `POST /classify`        — `{"answers": [..16 ints..]}` → classification trace
//! - `POST /share`           — `{"persona", "name", "description"}` → share links

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::engine::{validate_answers, Axis, QuizEngine, QuizError};
use crate::persona::PersonaSlug;
use crate::share::{result_url, ShareLinks};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Validated engine; cloning shares the registries.
    pub engine: QuizEngine,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State over the built-in registries and default configuration.
    pub fn new() -> Self {
        Self::with_engine(QuizEngine::builtin(), ServerConfig::default())
    }

    pub fn with_engine(engine: QuizEngine, config: ServerConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/questions", get(questions_handler))
        .route("/personas", get(list_personas_handler))
        .route("/personas/:slug", get(get_persona_handler))
        .route("/classify", post(classify_handler))
        .route("/share", post(share_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

fn quiz_error(err: QuizError) -> ApiError {
    let status = match err {
        ref e if e.is_caller_error() => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Engine failure: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_body(status, err.to_string())
}

/// Parse a persona slug; `missing` is the status for an unknown slug.
fn parse_slug(raw: &str, missing: StatusCode) -> Result<PersonaSlug, ApiError> {
    raw.parse::<PersonaSlug>()
        .map_err(|e| error_body(missing, e.to_string()))
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "persona-quiz",
    }))
}

/// GET /questions — question shapes for the front end.
async fn questions_handler(State(state): State<AppState>) -> Json<Value> {
    let questions = state.engine.questions();
    let axes: Vec<Value> = Axis::ALL
        .iter()
        .map(|axis| {
            let (negative, positive) = axis.poles();
            serde_json::json!({ "axis": axis, "negative": negative, "positive": positive })
        })
        .collect();
    Json(serde_json::json!({
        "count": questions.len(),
        "axes": axes,
        "questions": questions.iter().collect::<Vec<_>>(),
    }))
}

/// GET /personas — every profile in registry order.
async fn list_personas_handler(State(state): State<AppState>) -> Json<Value> {
    let personas = state.engine.personas();
    Json(serde_json::json!({
        "count": personas.len(),
        "personas": personas.iter().collect::<Vec<_>>(),
    }))
}

/// GET /personas/:slug — one profile.
async fn get_persona_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let slug = parse_slug(&slug, StatusCode::NOT_FOUND)?;
    let profile = state.engine.personas().get(slug).ok_or_else(|| {
        error_body(
            StatusCode::NOT_FOUND,
            format!("Persona '{}' is not registered", slug),
        )
    })?;
    Ok(Json(serde_json::json!(profile)))
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    answers: Vec<i64>,
}

/// POST /classify — answers in, persona and trace out.
async fn classify_handler(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<Value>, ApiError> {
    let answers = validate_answers(state.engine.questions(), &req.answers).map_err(|e| {
        tracing::warn!("Rejected answers: {}", e);
        quiz_error(e)
    })?;
    let classification = state.engine.classify(&answers).map_err(quiz_error)?;

    let link = result_url(&state.config.public_url, classification.persona)
        .map(String::from)
        .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(
        persona = %classification.persona,
        fallback = classification.is_fallback(),
        "Classified quiz answers"
    );

    let leanings: serde_json::Map<String, Value> = Axis::ALL
        .iter()
        .map(|&axis| {
            let leaning = classification.axis_scores.leaning(axis);
            (axis.to_string(), serde_json::json!(leaning))
        })
        .collect();

    Ok(Json(serde_json::json!({
        "persona": classification.persona,
        "result_url": link,
        "leanings": leanings,
        "classification": classification,
    })))
}

#[derive(Debug, Deserialize)]
struct ShareRequest {
    persona: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// POST /share — X, LinkedIn and direct result links.
async fn share_handler(
    State(state): State<AppState>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<Value>, ApiError> {
    let persona = parse_slug(&req.persona, StatusCode::BAD_REQUEST)?;
    let links = ShareLinks::build(
        &state.config.public_url,
        persona,
        &req.name,
        &req.description,
        &state.config.share,
    )
    .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(serde_json::json!(links)))
}
