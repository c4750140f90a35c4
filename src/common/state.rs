use std::sync::Arc;

use crate::config::Config;
use crate::services::QueryService;
use crate::store::DeviceStore;

#[derive(Clone)]
pub struct AppState {
    pub queries: QueryService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the request-facing state around an already-opened store.
    pub fn new(store: Arc<dyn DeviceStore>, config: Config) -> Self {
        Self {
            queries: QueryService::new(store),
            config: Arc::new(config),
        }
    }
}
