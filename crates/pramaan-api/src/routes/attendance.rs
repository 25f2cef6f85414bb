//! # Attendance Routes
//!
//! The attendance and verification triggers of the external boundary, plus
//! the read-side day-status query the scanner UI polls after a commit.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use pramaan_attest::{token, VerificationReport};
use pramaan_core::{
    AttendanceDay, AttendanceType, BiometricSample, DayStatus, GeoPoint, IdentityId,
    OrganizationId, VerifierId,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Proof issuance request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueRequest {
    /// The identity asserting presence.
    pub identity_id: Uuid,
    /// The organization attendance is recorded for.
    pub organization_id: Uuid,
    /// Check-in or check-out.
    #[schema(value_type = String)]
    pub attendance_type: AttendanceType,
    /// The fresh biometric capture.
    #[schema(value_type = Object)]
    pub sample: BiometricSample,
    /// The attendance day (`YYYY-MM-DD`). Defaults to today (UTC).
    pub day: Option<String>,
    /// Capture location in micro-degrees, if available.
    #[schema(value_type = Object)]
    pub location: Option<GeoPoint>,
}

impl Validate for IssueRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(day) = &self.day {
            AttendanceDay::parse(day).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

/// Proof issuance response: the scannable token and its expiry.
#[derive(Debug, Serialize, ToSchema)]
pub struct IssueResponse {
    /// The issued proof's identifier.
    pub proof_id: Uuid,
    /// The QR payload.
    pub token: String,
    /// When the token stops being scannable (ISO 8601).
    pub expires_at: String,
}

/// Verification request (admin-facing scan).
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// The scanned token string.
    pub token: String,
    /// The organization performing the scan.
    pub organization_id: Uuid,
    /// The scanning admin/device.
    pub verifier_id: Uuid,
}

impl Validate for VerifyRequest {
    fn validate(&self) -> Result<(), String> {
        if self.token.trim().is_empty() {
            return Err("token must not be empty".to_string());
        }
        Ok(())
    }
}

/// Day status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DayStatusResponse {
    /// The queried identity.
    pub identity_id: Uuid,
    /// The queried day.
    pub day: String,
    /// The verified status for that day.
    #[schema(value_type = String)]
    pub status: DayStatus,
}

/// Build the attendance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/attendance/proofs", post(issue_proof))
        .route("/v1/attendance/verify", post(verify_token))
        .route("/v1/attendance/:identity_id/:day", get(day_status))
}

/// POST /v1/attendance/proofs — issue a proof for a fresh sample.
#[utoipa::path(
    post,
    path = "/v1/attendance/proofs",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Proof issued", body = IssueResponse),
        (status = 401, description = "Sample mismatch", body = crate::error::ErrorBody),
        (status = 404, description = "Not enrolled", body = crate::error::ErrorBody),
        (status = 409, description = "Duplicate attendance or missing check-in", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub(crate) async fn issue_proof(
    State(state): State<AppState>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<(axum::http::StatusCode, Json<IssueResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let day = match &req.day {
        // Validated in Validate::validate; re-parse for the value.
        Some(s) => AttendanceDay::parse(s).map_err(|e| AppError::Validation(e.to_string()))?,
        None => AttendanceDay::today(),
    };

    let proof = state.issuer.issue(
        IdentityId(req.identity_id),
        OrganizationId(req.organization_id),
        req.attendance_type,
        &req.sample,
        day,
        req.location,
    )?;
    let token = token::encode(&proof)
        .map_err(|e| AppError::Internal(format!("token encoding: {e}")))?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(IssueResponse {
            proof_id: *proof.proof_id.as_uuid(),
            token: token.as_str().to_string(),
            expires_at: proof.expires_at.to_iso8601(),
        }),
    ))
}

/// POST /v1/attendance/verify — verify a scanned token.
#[utoipa::path(
    post,
    path = "/v1/attendance/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verified", body = Object),
        (status = 400, description = "Invalid token or malformed proof", body = crate::error::ErrorBody),
        (status = 403, description = "Organization mismatch", body = crate::error::ErrorBody),
        (status = 409, description = "Already verified or nullifier reused", body = crate::error::ErrorBody),
        (status = 410, description = "Proof expired", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub(crate) async fn verify_token(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationReport>, AppError> {
    let req = extract_validated_json(body)?;
    let report = state.verifier.verify(
        &req.token,
        OrganizationId(req.organization_id),
        VerifierId(req.verifier_id),
    )?;
    Ok(Json(report))
}

/// GET /v1/attendance/:identity_id/:day — verified day status.
#[utoipa::path(
    get,
    path = "/v1/attendance/{identity_id}/{day}",
    params(
        ("identity_id" = Uuid, Path, description = "Identity"),
        ("day" = String, Path, description = "Day (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Status", body = DayStatusResponse),
        (status = 422, description = "Bad day format", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub(crate) async fn day_status(
    State(state): State<AppState>,
    Path((identity_id, day)): Path<(Uuid, String)>,
) -> Result<Json<DayStatusResponse>, AppError> {
    let parsed = AttendanceDay::parse(&day).map_err(|e| AppError::Validation(e.to_string()))?;
    let status = state.proofs.day_status(IdentityId(identity_id), parsed);
    Ok(Json(DayStatusResponse {
        identity_id,
        day: parsed.to_string(),
        status,
    }))
}
