//! # Enrollment Routes
//!
//! The enrollment trigger of the external boundary: submit a sample, get
//! back a non-secret handle or a typed error. Re-enrollment and revocation
//! are explicit endpoints — enrollment never silently replaces a record.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use pramaan_core::{BiometricSample, IdentityId, Modality, OrganizationId};
use pramaan_store::CommitmentHandle;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Enrollment request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    /// The identity to enroll.
    pub identity_id: Uuid,
    /// The organization enrolling it.
    pub organization_id: Uuid,
    /// The biometric sample: `{"modality": "...", "data": "<base64>"}`.
    #[schema(value_type = Object)]
    pub sample: BiometricSample,
}

impl Validate for EnrollRequest {
    fn validate(&self) -> Result<(), String> {
        // Sample shape is validated by its own deserializer; nothing
        // further to check beyond presence.
        Ok(())
    }
}

/// Revocation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RevokeRequest {
    /// The identity whose enrollment is revoked.
    pub identity_id: Uuid,
    /// The modality to revoke.
    #[schema(value_type = String)]
    pub modality: Modality,
}

impl Validate for RevokeRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Build the enrollment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/enrollments", post(enroll))
        .route("/v1/enrollments/re-enroll", post(re_enroll))
        .route("/v1/enrollments/revoke", post(revoke))
}

/// POST /v1/enrollments — enroll a biometric sample.
#[utoipa::path(
    post,
    path = "/v1/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = Object),
        (status = 409, description = "Duplicate biometric or already enrolled", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid sample", body = crate::error::ErrorBody),
    ),
    tag = "enrollment"
)]
pub(crate) async fn enroll(
    State(state): State<AppState>,
    body: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<(axum::http::StatusCode, Json<CommitmentHandle>), AppError> {
    let req = extract_validated_json(body)?;
    let handle = state.enrollment.enroll(
        IdentityId(req.identity_id),
        OrganizationId(req.organization_id),
        &req.sample,
    )?;
    Ok((axum::http::StatusCode::CREATED, Json(handle)))
}

/// POST /v1/enrollments/re-enroll — replace an existing enrollment.
#[utoipa::path(
    post,
    path = "/v1/enrollments/re-enroll",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Re-enrolled", body = Object),
        (status = 409, description = "Duplicate biometric", body = crate::error::ErrorBody),
    ),
    tag = "enrollment"
)]
pub(crate) async fn re_enroll(
    State(state): State<AppState>,
    body: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<Json<CommitmentHandle>, AppError> {
    let req = extract_validated_json(body)?;
    let handle = state.enrollment.re_enroll(
        IdentityId(req.identity_id),
        OrganizationId(req.organization_id),
        &req.sample,
    )?;
    Ok(Json(handle))
}

/// POST /v1/enrollments/revoke — administratively revoke an enrollment.
#[utoipa::path(
    post,
    path = "/v1/enrollments/revoke",
    request_body = RevokeRequest,
    responses(
        (status = 200, description = "Revoked", body = Object),
        (status = 500, description = "No active enrollment", body = crate::error::ErrorBody),
    ),
    tag = "enrollment"
)]
pub(crate) async fn revoke(
    State(state): State<AppState>,
    body: Result<Json<RevokeRequest>, JsonRejection>,
) -> Result<Json<CommitmentHandle>, AppError> {
    let req = extract_validated_json(body)?;
    let handle = state
        .enrollment
        .revoke(IdentityId(req.identity_id), req.modality)?;
    Ok(Json(handle))
}
