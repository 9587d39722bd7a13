use std::sync::Arc;

use crate::{config::Config, db::Cache, services::BundleBuilder};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<BundleBuilder>,
    pub cache: Cache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, cache: Cache, builder: BundleBuilder) -> Self {
        Self {
            builder: Arc::new(builder),
            cache,
            config: Arc::new(config),
        }
    }
}
