use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::services::query::EventTypeHistogram;
use crate::store::{Device, DeviceEvent, DeviceReading};

use super::types::DeviceDataQuery;

/// List all devices ordered by id
#[utoipa::path(
    get,
    path = "/api/devices",
    responses(
        (status = 200, description = "Devices retrieved successfully", body = Vec<Device>),
    ),
    tag = "devices"
)]
pub async fn list_devices(State(state): State<AppState>) -> AppResult<Json<Vec<Device>>> {
    Ok(Json(state.queries.list_devices().await?))
}

/// Get a single device
#[utoipa::path(
    get,
    path = "/api/devices/{device_id}",
    params(
        ("device_id" = i32, Path, description = "Device id"),
    ),
    responses(
        (status = 200, description = "Device retrieved successfully", body = Device),
        (status = 404, description = "Device not found"),
    ),
    tag = "devices"
)]
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<Device>> {
    Ok(Json(state.queries.get_device(&device_id).await?))
}

/// Latest readings of a device, oldest first
///
/// Unknown devices yield an empty array.
#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/readings",
    params(
        ("device_id" = i32, Path, description = "Device id"),
        DeviceDataQuery,
    ),
    responses(
        (status = 200, description = "Readings in chronological order", body = Vec<DeviceReading>),
    ),
    tag = "devices"
)]
pub async fn list_device_readings(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<DeviceReading>>> {
    let query = DeviceDataQuery::from_pairs(params);
    let readings = state
        .queries
        .device_readings(&device_id, query.limit.as_deref())
        .await?;
    Ok(Json(readings))
}

/// Latest events of a device, oldest first
///
/// Unknown devices yield an empty array.
#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/events",
    params(
        ("device_id" = i32, Path, description = "Device id"),
        DeviceDataQuery,
    ),
    responses(
        (status = 200, description = "Events in chronological order", body = Vec<DeviceEvent>),
    ),
    tag = "devices"
)]
pub async fn list_device_events(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<DeviceEvent>>> {
    let query = DeviceDataQuery::from_pairs(params);
    let events = state
        .queries
        .device_events(&device_id, query.limit.as_deref())
        .await?;
    Ok(Json(events))
}

/// Number of events per event type for a device
#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/events/count-by-type",
    params(
        ("device_id" = i32, Path, description = "Device id"),
    ),
    responses(
        (status = 200, description = "Map of event type to count", body = std::collections::BTreeMap<String, i64>),
    ),
    tag = "devices"
)]
pub async fn count_device_events_by_type(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<EventTypeHistogram>> {
    Ok(Json(state.queries.count_events_by_type(&device_id).await?))
}
