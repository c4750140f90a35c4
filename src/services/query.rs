use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::{
    Device, DeviceEvent, DeviceReading, DeviceStore, EventTypeCount, EventWithDevice,
    ReadingWithDevice,
};

/// Row cap for the global "recent" listings
pub const RECENT_LIMIT: u64 = 100;

/// Per-device limit used when `limit` is absent or unusable
pub const DEFAULT_DEVICE_LIMIT: u64 = 100;

/// Event type label -> number of events. Keys are sorted, so the JSON
/// rendering is stable across identical requests.
pub type EventTypeHistogram = BTreeMap<String, i64>;

/// Read-side operations exposed by the API.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn DeviceStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    pub async fn list_devices(&self) -> AppResult<Vec<Device>> {
        Ok(self.store.list_devices().await?)
    }

    pub async fn recent_events(&self) -> AppResult<Vec<EventWithDevice>> {
        Ok(self.store.recent_events(RECENT_LIMIT).await?)
    }

    pub async fn recent_readings(&self) -> AppResult<Vec<ReadingWithDevice>> {
        Ok(self.store.recent_readings(RECENT_LIMIT).await?)
    }

    /// The only per-device operation that reports a missing device.
    ///
    /// Ids must be plain integers (surrounding whitespace allowed). Anything
    /// else, such as `"1abc"`, matches no device and yields `NotFound`.
    pub async fn get_device(&self, device_id: &str) -> AppResult<Device> {
        let device = match parse_device_id(device_id) {
            Some(id) => self.store.find_device(id).await?,
            None => None,
        };

        device.ok_or_else(|| AppError::NotFound("Device not found".to_string()))
    }

    /// Latest readings of a device, returned oldest first.
    pub async fn device_readings(
        &self,
        device_id: &str,
        limit: Option<&str>,
    ) -> AppResult<Vec<DeviceReading>> {
        let Some(id) = parse_device_id(device_id) else {
            return Ok(Vec::new());
        };

        let mut rows = self
            .store
            .latest_device_readings(id, parse_limit(limit))
            .await?;
        rows.reverse();
        Ok(rows)
    }

    /// Latest events of a device, returned oldest first.
    pub async fn device_events(
        &self,
        device_id: &str,
        limit: Option<&str>,
    ) -> AppResult<Vec<DeviceEvent>> {
        let Some(id) = parse_device_id(device_id) else {
            return Ok(Vec::new());
        };

        let mut rows = self.store.latest_device_events(id, parse_limit(limit)).await?;
        rows.reverse();
        Ok(rows)
    }

    pub async fn count_events_by_type(&self, device_id: &str) -> AppResult<EventTypeHistogram> {
        let Some(id) = parse_device_id(device_id) else {
            return Ok(EventTypeHistogram::new());
        };

        let rows = self.store.event_type_counts(id).await?;
        tracing::debug!(device_id = id, groups = rows.len(), "Event types counted");
        Ok(histogram(rows))
    }
}

/// Fold grouped rows into a label -> count map.
#[must_use]
pub fn histogram(rows: impl IntoIterator<Item = EventTypeCount>) -> EventTypeHistogram {
    rows.into_iter()
        .fold(EventTypeHistogram::new(), |mut acc, row| {
            *acc.entry(row.event_type).or_insert(0) += row.count;
            acc
        })
}

/// Coerce a raw `limit` query value the way a lenient integer parse would:
/// skip leading whitespace and `+`, take the leading digits. Anything that
/// yields no positive number falls back to [`DEFAULT_DEVICE_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> u64 {
    raw.and_then(leading_integer)
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_DEVICE_LIMIT)
}

fn leading_integer(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail here
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn parse_device_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
