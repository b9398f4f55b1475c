use axum::http::StatusCode;

/// Liveness probe for `GET /healthz`. Answers 200 as long as the process
/// is up; no dependencies are consulted.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe for `GET /readyz`. The identity service is ready once
/// its router serves; a service gated on external dependencies should
/// mount its own handler instead of this one.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
