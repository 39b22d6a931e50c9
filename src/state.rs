//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::Database;
use crate::realtime::{Notifier, RealtimeHub};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: EnvironmentConfig,
    pub hub: RealtimeHub,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let hub = RealtimeHub::default();
        Self {
            db: Database::new(),
            config,
            notifier: Arc::new(hub.clone()),
            hub,
        }
    }
}
