pub mod devices;
pub mod events;
pub mod health;
mod rate_limit;
pub mod readings;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use rate_limit::ClientIpKeyExtractor;

use crate::common::AppState;
use crate::store::{Device, DeviceEvent, DeviceReading, EventWithDevice, ReadingWithDevice};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        devices::list_devices,
        devices::get_device,
        devices::list_device_readings,
        devices::list_device_events,
        devices::count_device_events_by_type,
        events::list_recent_events,
        readings::list_recent_readings,
    ),
    components(
        schemas(
            Device,
            DeviceEvent,
            DeviceReading,
            EventWithDevice,
            ReadingWithDevice,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "devices", description = "Devices and their per-device data"),
        (name = "events", description = "Recent events across all devices"),
        (name = "readings", description = "Recent sensor readings across all devices"),
    ),
    info(
        title = "IoT Dashboard API",
        description = "Read-only access to IoT devices, events and sensor readings",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let api_routes_base = Router::new()
        .route("/devices", get(devices::list_devices))
        .route("/devices/{device_id}", get(devices::get_device))
        .route(
            "/devices/{device_id}/readings",
            get(devices::list_device_readings),
        )
        .route("/devices/{device_id}/events", get(devices::list_device_events))
        .route(
            "/devices/{device_id}/events/count-by-type",
            get(devices::count_device_events_by_type),
        )
        .route("/events", get(events::list_recent_events))
        .route("/readings", get(readings::list_recent_readings));

    let api_routes = if !config.enable_rate_limiting {
        tracing::debug!("Rate limiting not enabled");
        api_routes_base
    } else {
        let limiter = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_second(config.rate_limit_replenish_seconds)
            .burst_size(config.rate_limit_burst)
            .finish();

        match limiter {
            Some(limiter) => {
                tracing::info!(
                    replenish_seconds = config.rate_limit_replenish_seconds,
                    burst = config.rate_limit_burst,
                    "Rate limiting configured"
                );
                api_routes_base.layer(GovernorLayer {
                    config: Arc::new(limiter),
                })
            }
            None => {
                tracing::warn!(
                    replenish_seconds = config.rate_limit_replenish_seconds,
                    burst = config.rate_limit_burst,
                    "Rate limit settings must be non-zero, limiter not installed"
                );
                api_routes_base
            }
        }
    }
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
