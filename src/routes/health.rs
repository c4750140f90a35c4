use axum::http::StatusCode;

/// Liveness probe
///
/// Answers without touching the database and is never rate-limited.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Process is up"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
