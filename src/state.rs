//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El pool es el único recurso mutable compartido.

use sqlx::SqlitePool;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::vehicle_controller::VehicleController;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }

    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.pool.clone())
    }
}
