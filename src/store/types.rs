use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct Device {
    pub device_id: i32,
    pub device_name: String,
    pub device_type: String,
    pub description: Option<String>,
}

/// Event joined with the name of the device that raised it
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct EventWithDevice {
    pub event_id: i32,
    pub device_id: i32,
    pub device_name: String,
    pub event_time: DateTime<Utc>,
    pub event_type: String,
    pub note: Option<String>,
}

/// Sensor reading joined with the name of the device that produced it
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct ReadingWithDevice {
    pub reading_id: i32,
    pub device_id: i32,
    pub device_name: String,
    pub metric: String,
    pub reading_time: DateTime<Utc>,
    pub value_float: f64,
    pub threshold: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct DeviceEvent {
    pub event_id: i32,
    pub event_time: DateTime<Utc>,
    pub event_type: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct DeviceReading {
    pub reading_id: i32,
    pub reading_time: DateTime<Utc>,
    pub metric: String,
    pub value_float: f64,
    pub threshold: Option<f64>,
    pub unit: Option<String>,
}

/// One `GROUP BY event_type` row
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: i64,
}
