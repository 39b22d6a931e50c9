//! Módulo de base de datos
//!
//! Almacén en proceso del servicio: todas las tablas viven bajo un único
//! `RwLock`, así que un write guard cubre operaciones que tocan más de una
//! tabla (en particular el par append-de-evento + proyección del vehículo).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::movement_event::MovementEvent;
use crate::models::quarry::Quarry;
use crate::models::quarry_event::QuarryAggregateEvent;
use crate::models::vehicle::Vehicle;

/// Tablas del sistema, una por entidad
#[derive(Debug, Default)]
pub struct Tables {
    pub vehicles: HashMap<Uuid, Vehicle>,
    pub movement_events: HashMap<Uuid, MovementEvent>,
    pub quarries: HashMap<Uuid, Quarry>,
    pub quarry_events: HashMap<Uuid, QuarryAggregateEvent>,
}

/// Handle clonable al almacén compartido
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
