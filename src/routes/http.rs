//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs carry ids and sizes, never answer text.

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::instrument;

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_plans(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.plans.clone())
}

#[instrument(level = "info", skip(state, body), fields(grade = body.grade))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Result<Json<SessionOut>, ApiError> {
  let mut rng = rand::thread_rng();
  start_session(&state, &body, &mut rng).map(Json)
}

#[instrument(level = "info", skip(state, body), fields(%body.problem_id, answer_len = body.final_answer.len()))]
pub async fn http_post_verify(
  State(state): State<Arc<AppState>>,
  Json(body): Json<VerifyIn>,
) -> Result<Json<VerifyOut>, ApiError> {
  check_answer(&state, &body).map(Json)
}

#[instrument(level = "info", skip(state, body), fields(grade = body.grade))]
pub async fn http_post_breakdown(
  State(state): State<Arc<AppState>>,
  Json(body): Json<BreakdownIn>,
) -> impl IntoResponse {
  Json(breakdown(&state, &body))
}
