//! HTTP-facing error type. Core verification never produces one of these for bad student input.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::session::SessionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub error: String,
  pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
  status: StatusCode,
  code: &'static str,
  message: String,
}

impl ApiError {
  pub fn not_found(message: impl Into<String>) -> Self {
    Self { status: StatusCode::NOT_FOUND, code: "NOT_FOUND", message: message.into() }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, code: "VALIDATION_ERROR", message: message.into() }
  }

  pub fn status(&self) -> StatusCode {
    self.status
  }
}

impl From<SessionError> for ApiError {
  fn from(e: SessionError) -> Self {
    match e {
      SessionError::EmptyPool => ApiError::not_found("No problems available for this grade"),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = ErrorResponse { success: false, error: self.message, code: self.code.to_string() };
    (self.status, Json(body)).into_response()
  }
}
