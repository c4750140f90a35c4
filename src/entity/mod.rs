//! sea-orm entities for the tables written by the ingestion pipeline.
//! The service only ever reads through them.

pub mod device;
pub mod event;
pub mod sensor_reading;
