//! # OpenAPI Document
//!
//! Auto-generated OpenAPI spec from the utoipa path annotations, served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// The OpenAPI document for the attendance API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pramaan Attendance API",
        description = "Biometric commitment enrollment, attendance proof issuance, and scan verification.",
    ),
    paths(
        crate::routes::enrollment::enroll,
        crate::routes::enrollment::re_enroll,
        crate::routes::enrollment::revoke,
        crate::routes::attendance::issue_proof,
        crate::routes::attendance::verify_token,
        crate::routes::attendance::day_status,
    ),
    components(schemas(
        crate::routes::enrollment::EnrollRequest,
        crate::routes::enrollment::RevokeRequest,
        crate::routes::attendance::IssueRequest,
        crate::routes::attendance::IssueResponse,
        crate::routes::attendance::VerifyRequest,
        crate::routes::attendance::DayStatusResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "enrollment", description = "Biometric enrollment"),
        (name = "attendance", description = "Proof issuance and verification"),
    )
)]
pub struct ApiDoc;

/// Router serving the document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
