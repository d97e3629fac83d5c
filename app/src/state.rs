//! Process-wide state shared by the command handlers

use crate::config::AppConfig;
use finders_engine::ServiceContext;
use finders_networking::FindersClient;
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub context: ServiceContext,
}

impl AppState {
    pub fn new(config: AppConfig) -> finders_core::Result<Self> {
        let context = ServiceContext::init(&config.client_config(), config.cache_ttl())?;
        Ok(Self { config, context })
    }

    pub fn client(&self) -> finders_core::Result<Arc<FindersClient>> {
        self.context.client()
    }

    pub fn shutdown(&mut self) {
        self.context.dispose();
    }
}
