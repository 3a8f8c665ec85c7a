use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::planner::PlanError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid date range: {0}")]
    InvalidRange(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::InvalidRange(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_range"),
            ApiError::Plan(PlanError::NoCandidateMenu) => {
                (StatusCode::SERVICE_UNAVAILABLE, "no_candidate_menu")
            }
            ApiError::Plan(PlanError::Persistence { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
            }
            ApiError::Plan(PlanError::Store(_)) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if code == "internal_error" {
            error!(error = %self, "request failed");
            "Something went wrong".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
    }
}
