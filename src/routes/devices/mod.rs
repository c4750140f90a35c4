mod handlers;
mod types;

pub use handlers::{
    count_device_events_by_type, get_device, list_device_events, list_device_readings,
    list_devices,
};
pub use types::DeviceDataQuery;

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_count_device_events_by_type, __path_get_device, __path_list_device_events,
    __path_list_device_readings, __path_list_devices,
};
