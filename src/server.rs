//! HTTP surface over the fitness service
//!
//! A thin axum router: it parses path and query parameters, calls the
//! service, and maps service errors to status codes.

use axum::extract::{Path, Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::data::{available_muscles, AdviceSlipClient};
use crate::error::{ErrorKind, FitnessError};
use crate::service::FitnessService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FitnessService>,
    pub advice: AdviceSlipClient,
    pub started: Instant,
}

impl AppState {
    pub fn new(service: Arc<FitnessService>, advice: AdviceSlipClient) -> Self {
        Self {
            service,
            advice,
            started: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: String,
    service: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MusclesResponse {
    pub muscles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}

/// `?limit=` as sent by the caller; non-numeric values count as absent
#[derive(Debug, Deserialize)]
struct ExercisesQuery {
    limit: Option<String>,
}

impl IntoResponse for FitnessError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match kind {
            ErrorKind::UnknownMuscle => StatusCode::NOT_FOUND,
            ErrorKind::Upstream => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = json!({
            "error": self.to_string(),
            "kind": kind.as_str(),
        });
        (status, Json(body)).into_response()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(300));

    Router::new()
        .route("/healthz", get(health))
        .route("/exercises", get(list_muscles))
        .route("/exercises/", get(list_muscles))
        .route("/exercises/:muscle", get(get_exercises))
        .route("/advice", get(get_advice))
        .fallback(redirect_to_exercises)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// GET /healthz
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: format!("{}s", state.started.elapsed().as_secs()),
        service: "fitagg",
    })
}

/// GET /exercises
async fn list_muscles() -> Json<MusclesResponse> {
    Json(MusclesResponse {
        muscles: available_muscles().into_iter().map(String::from).collect(),
    })
}

/// GET /exercises/:muscle?limit=N
async fn get_exercises(
    State(state): State<AppState>,
    Path(muscle): Path<String>,
    Query(query): Query<ExercisesQuery>,
) -> Result<Response, FitnessError> {
    let limit = query.limit.and_then(|s| s.trim().parse::<i64>().ok());
    match state.service.get_exercises(&muscle, limit).await {
        Ok(response) => Ok(Json(response).into_response()),
        Err(e) => {
            warn!(muscle = %muscle, error = %e, "failed to get exercises");
            Err(e)
        }
    }
}

/// GET /advice
async fn get_advice(State(state): State<AppState>) -> Json<AdviceResponse> {
    Json(AdviceResponse {
        advice: state.advice.fetch_advice().await,
    })
}

/// Unknown routes land on the muscle listing
async fn redirect_to_exercises(method: Method) -> Response {
    let status = if method == Method::GET || method == Method::HEAD {
        StatusCode::FOUND
    } else {
        StatusCode::TEMPORARY_REDIRECT
    };
    (status, [(header::LOCATION, "/exercises")]).into_response()
}
