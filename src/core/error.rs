use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::reports::models::ReportError;
use crate::features::reports::services::MailError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Report is incomplete: {}", .0.join(", "))]
    Incomplete(Vec<String>),

    #[error("Invalid report data: {0}")]
    DataInvalid(#[from] ReportError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Data(e) => AppError::DataInvalid(e),
            MailError::MissingRecipient | MailError::MissingAddress => {
                AppError::Validation(err.to_string())
            }
            MailError::Template(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::Incomplete(ref reasons) => (
                StatusCode::BAD_REQUEST,
                "Report is incomplete".to_string(),
                Some(reasons.clone()),
            ),
            AppError::DataInvalid(ref e) => {
                tracing::warn!("Invalid report data: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    e.to_string(),
                    Some(vec![e.to_string()]),
                )
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
