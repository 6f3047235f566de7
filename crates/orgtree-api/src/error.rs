//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered as the failure envelope
//! `{"success": false, "message": "..."}`.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use orgtree_core::envelope::SaveResponse;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid chart: {0}")]
  Invalid(#[from] orgtree_core::Error),

  #[error("malformed request: {0}")]
  Rejected(#[from] JsonRejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
      ApiError::Rejected(r) => r.status(),
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, "request rejected");
    }
    (status, Json(SaveResponse::failed(self.to_string()))).into_response()
  }
}
