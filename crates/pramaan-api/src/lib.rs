//! # pramaan-api — Axum Boundary for the Attendance Stack
//!
//! Exposes exactly the external triggers of the attendance core:
//!
//! | Route                                  | Module                   | Action              |
//! |----------------------------------------|--------------------------|---------------------|
//! | `POST /v1/enrollments`                 | [`routes::enrollment`]   | Enroll a sample     |
//! | `POST /v1/enrollments/re-enroll`       | [`routes::enrollment`]   | Replace enrollment  |
//! | `POST /v1/enrollments/revoke`          | [`routes::enrollment`]   | Revoke enrollment   |
//! | `POST /v1/attendance/proofs`           | [`routes::attendance`]   | Issue proof + token |
//! | `POST /v1/attendance/verify`           | [`routes::attendance`]   | Verify scanned token|
//! | `GET  /v1/attendance/{id}/{day}`       | [`routes::attendance`]   | Day status          |
//! | `GET  /openapi.json`                   | [`openapi`]              | OpenAPI document    |
//!
//! Organization CRUD, roles, sessions, reports, and UI concerns live in the
//! surrounding deployment, not here.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
///
/// Health probes are mounted next to the API routes; there is no auth
/// layer here — session handling belongs to the surrounding deployment.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::enrollment::router())
        .merge(routes::attendance::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — 200 whenever the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 once state is constructed (no external
/// dependencies to wait for with the in-memory stores).
async fn readiness() -> &'static str {
    "ready"
}
