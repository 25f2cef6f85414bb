//! # API Error Types
//!
//! Structured error type implementing `IntoResponse`. Maps the service
//! taxonomy onto HTTP status codes and JSON error bodies. Internal error
//! details are never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pramaan_attest::{EnrollError, IssueError, VerifyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// The error detail.
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. "DUPLICATE_BIOMETRIC".
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Application-level error mapping to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// 422.
    #[error("validation error: {0}")]
    Validation(String),

    /// 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401 — a biometric binding or attestation failure.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 403.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 409.
    #[error("conflict: {0}")]
    Conflict(String),

    /// 410 — the referenced proof has expired.
    #[error("gone: {0}")]
    Gone(String),

    /// 500. Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code, carrying the domain-specific
    /// code when one was attached.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Gone(_) => (StatusCode::GONE, "GONE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };
        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<EnrollError> for AppError {
    fn from(err: EnrollError) -> Self {
        match &err {
            EnrollError::InvalidSample(_) => Self::Validation(err.to_string()),
            EnrollError::AlreadyEnrolled { .. } | EnrollError::DuplicateBiometric { .. } => {
                Self::Conflict(err.to_string())
            }
            EnrollError::Binding(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match &err {
            IssueError::NotEnrolled { .. } => Self::NotFound(err.to_string()),
            IssueError::SampleMismatch { .. } => Self::Unauthorized(err.to_string()),
            IssueError::NoCheckIn { .. } | IssueError::DuplicateAttendance { .. } => {
                Self::Conflict(err.to_string())
            }
            IssueError::Assembly(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match &err {
            VerifyError::InvalidToken(_) | VerifyError::MalformedProof(_) => {
                Self::BadRequest(err.to_string())
            }
            VerifyError::ProofNotFound(_) => Self::NotFound(err.to_string()),
            VerifyError::OrganizationMismatch => Self::Forbidden(err.to_string()),
            VerifyError::ProofExpired(_) => Self::Gone(err.to_string()),
            VerifyError::AlreadyVerified(_) | VerifyError::NullifierReused => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
