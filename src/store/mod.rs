//! Storage seam between the query layer and the relational store.
//!
//! Every method maps to exactly one parameterized query. Rows come back in
//! the order the SQL produces them; reshaping for API consumers happens in
//! [`crate::services::query`].

mod database;
mod types;

pub use database::{connect, DatabaseStore};
pub use types::{
    Device, DeviceEvent, DeviceReading, EventTypeCount, EventWithDevice, ReadingWithDevice,
};

use async_trait::async_trait;
use sea_orm::DbErr;

#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// All devices, ascending by `device_id`.
    async fn list_devices(&self) -> Result<Vec<Device>, DbErr>;

    async fn find_device(&self, device_id: i32) -> Result<Option<Device>, DbErr>;

    /// Up to `limit` events across all devices, newest first. Events whose
    /// device row is missing are dropped (inner join).
    async fn recent_events(&self, limit: u64) -> Result<Vec<EventWithDevice>, DbErr>;

    /// Up to `limit` readings across all devices, newest first. Inner join
    /// semantics as for [`DeviceStore::recent_events`].
    async fn recent_readings(&self, limit: u64) -> Result<Vec<ReadingWithDevice>, DbErr>;

    /// The `limit` newest events of one device, newest first.
    async fn latest_device_events(
        &self,
        device_id: i32,
        limit: u64,
    ) -> Result<Vec<DeviceEvent>, DbErr>;

    /// The `limit` newest readings of one device, newest first.
    async fn latest_device_readings(
        &self,
        device_id: i32,
        limit: u64,
    ) -> Result<Vec<DeviceReading>, DbErr>;

    /// Event counts per `event_type` for one device.
    async fn event_type_counts(&self, device_id: i32) -> Result<Vec<EventTypeCount>, DbErr>;
}
