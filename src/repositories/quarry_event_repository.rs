//! Repositorio de la bitácora agregada por cantera
//!
//! Política de validación más estricta que la bitácora por vehículo:
//! la cantera referenciada debe existir antes de cualquier escritura;
//! si no existe, la operación completa falla (sin skip suave).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::Database;
use crate::dto::quarry_event_dto::{QuarryEventFilters, UpdateQuarryEventRequest};
use crate::models::quarry_event::{QuarryAggregateEvent, QuarryLogType};
use crate::utils::errors::{not_found_error, AppResult};

pub struct QuarryEventRepository {
    db: Database,
}

impl QuarryEventRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Crear un evento agregado. La existencia de la cantera se verifica
    /// bajo el mismo write guard que la inserción: fallo duro si falta.
    pub async fn create(
        &self,
        quarry_id: Uuid,
        log_type: QuarryLogType,
        truck_count: u32,
        notes: Option<String>,
        log_date: Option<DateTime<Utc>>,
        logged_by: Uuid,
    ) -> AppResult<QuarryAggregateEvent> {
        let mut tables = self.db.write().await;

        if !tables.quarries.contains_key(&quarry_id) {
            return Err(not_found_error("Quarry", &quarry_id.to_string()));
        }

        let event = QuarryAggregateEvent {
            id: Uuid::new_v4(),
            quarry_id,
            log_type,
            truck_count,
            notes,
            logged_by,
            log_date: log_date.unwrap_or_else(Utc::now),
            created_at: Utc::now(),
        };
        tables.quarry_events.insert(event.id, event.clone());
        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<QuarryAggregateEvent> {
        let tables = self.db.read().await;
        tables.quarry_events.get(&id).cloned()
    }

    pub async fn list(&self, filters: &QuarryEventFilters) -> Vec<QuarryAggregateEvent> {
        let tables = self.db.read().await;
        let mut events: Vec<QuarryAggregateEvent> = tables
            .quarry_events
            .values()
            .filter(|e| filters.log_type.map_or(true, |t| e.log_type == t))
            .filter(|e| filters.quarry_id.map_or(true, |q| e.quarry_id == q))
            .filter(|e| {
                filters
                    .start_date
                    .map_or(true, |s| e.log_date.date_naive() >= s)
            })
            .filter(|e| {
                filters
                    .end_date
                    .map_or(true, |s| e.log_date.date_naive() <= s)
            })
            .cloned()
            .collect();
        events.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        events
    }

    /// Actualización parcial: solo truck_count, notes y log_date.
    /// La referencia a la cantera y el tipo de evento no cambian nunca.
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateQuarryEventRequest,
    ) -> AppResult<QuarryAggregateEvent> {
        let mut tables = self.db.write().await;
        let event = tables
            .quarry_events
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Quarry aggregate event", &id.to_string()))?;

        if let Some(truck_count) = patch.truck_count {
            event.truck_count = truck_count;
        }
        if let Some(notes) = patch.notes {
            event.notes = Some(notes);
        }
        if let Some(log_date) = patch.log_date {
            event.log_date = log_date;
        }

        Ok(event.clone())
    }

    /// Borrado incondicional: no hay proyección derivada que revertir
    pub async fn delete(&self, id: Uuid) -> AppResult<QuarryAggregateEvent> {
        let mut tables = self.db.write().await;
        tables
            .quarry_events
            .remove(&id)
            .ok_or_else(|| not_found_error("Quarry aggregate event", &id.to_string()))
    }

    /// Copia completa para las agregaciones
    pub async fn snapshot_all(&self) -> Vec<QuarryAggregateEvent> {
        let tables = self.db.read().await;
        tables.quarry_events.values().cloned().collect()
    }
}
