use axum::{extract::State, Json};

use crate::common::AppState;
use crate::error::AppResult;
use crate::store::ReadingWithDevice;

/// Most recent sensor readings across all devices
///
/// At most 100 rows, newest first. Readings of unknown devices are omitted.
#[utoipa::path(
    get,
    path = "/api/readings",
    responses(
        (status = 200, description = "Recent readings retrieved successfully", body = Vec<ReadingWithDevice>),
    ),
    tag = "readings"
)]
pub async fn list_recent_readings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReadingWithDevice>>> {
    Ok(Json(state.queries.recent_readings().await?))
}
