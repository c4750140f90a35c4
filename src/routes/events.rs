use axum::{extract::State, Json};

use crate::common::AppState;
use crate::error::AppResult;
use crate::store::EventWithDevice;

/// Most recent events across all devices
///
/// At most 100 rows, newest first. Events of unknown devices are omitted.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Recent events retrieved successfully", body = Vec<EventWithDevice>),
    ),
    tag = "events"
)]
pub async fn list_recent_events(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EventWithDevice>>> {
    Ok(Json(state.queries.recent_events().await?))
}
