//! Repositorio de la bitácora de movimientos
//!
//! Ruta de escritura del ledger junto con la proyección de estado del
//! vehículo: el append del evento y la actualización de
//! `current_status`/`last_log_time` ocurren bajo el mismo write guard,
//! como una sola unidad lógica por entrada.

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::database::Database;
use crate::dto::movement_dto::{MovementEntry, MovementFilters};
use crate::models::movement_event::MovementEvent;
use crate::models::vehicle::{CurrentStatus, LogType};
use crate::utils::errors::{not_found_error, AppResult};

/// Resultado de la ingesta: eventos creados y entradas saltadas
#[derive(Debug)]
pub struct BatchOutcome {
    pub created: Vec<MovementEvent>,
    pub skipped: usize,
}

pub struct MovementRepository {
    db: Database,
}

impl MovementRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Ingesta por lote. Por cada entrada con `count > 0`:
    /// - vehículo inexistente -> skip silencioso, el batch continúa;
    /// - vehículo resuelto -> evento con snapshot de placa/marca/empresa
    ///   + proyección `current_status = log_type`, `last_log_time = now`.
    /// Entradas con `count <= 0` se ignoran sin contarse como saltadas.
    pub async fn ingest_batch(
        &self,
        entries: &[MovementEntry],
        log_type: LogType,
        log_date: Option<DateTime<Utc>>,
        log_time: Option<String>,
        user_id: Uuid,
    ) -> BatchOutcome {
        let now = Utc::now();
        let log_date = log_date.unwrap_or(now);
        let log_time =
            log_time.unwrap_or_else(|| Local::now().format("%I:%M:%S %p").to_string());

        let mut tables = self.db.write().await;
        let mut created = Vec::new();
        let mut skipped = 0;

        for entry in entries.iter().filter(|e| e.count > 0) {
            // Snapshot de una sola lectura del registro; el evento queda
            // inmune a ediciones posteriores del vehículo
            let snapshot = match tables.vehicles.get(&entry.vehicle_id) {
                Some(vehicle) => (
                    vehicle.plate_number.clone(),
                    vehicle.brand.clone(),
                    vehicle.company.clone(),
                ),
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let event = MovementEvent {
                id: Uuid::new_v4(),
                vehicle_id: entry.vehicle_id,
                plate_number: snapshot.0,
                brand: snapshot.1,
                company: snapshot.2,
                log_type,
                log_date,
                log_time: log_time.clone(),
                user_id,
                created_at: Utc::now(),
            };
            tables.movement_events.insert(event.id, event.clone());

            // Proyección: el mismo guard cubre append y actualización
            if let Some(vehicle) = tables.vehicles.get_mut(&entry.vehicle_id) {
                vehicle.current_status = CurrentStatus::from(log_type);
                vehicle.last_log_time = Some(Utc::now());
            }

            created.push(event);
        }

        BatchOutcome { created, skipped }
    }

    /// Listar la bitácora, ordenada por fecha de evento y de creación,
    /// ambas descendentes. `scope_user` limita al usuario que registró.
    pub async fn list(
        &self,
        filters: &MovementFilters,
        scope_user: Option<Uuid>,
    ) -> Vec<MovementEvent> {
        let tables = self.db.read().await;
        let mut events: Vec<MovementEvent> = tables
            .movement_events
            .values()
            .filter(|e| scope_user.map_or(true, |u| e.user_id == u))
            .filter(|e| filters.log_type.map_or(true, |t| e.log_type == t))
            .filter(|e| filters.vehicle_id.map_or(true, |v| e.vehicle_id == v))
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
        events.sort_by(|a, b| {
            b.log_date
                .cmp(&a.log_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        events
    }

    /// Borrado administrativo. No recalcula la proyección del vehículo:
    /// borrar historial no reescribe el presente.
    pub async fn delete(&self, id: Uuid) -> AppResult<MovementEvent> {
        let mut tables = self.db.write().await;
        tables
            .movement_events
            .remove(&id)
            .ok_or_else(|| not_found_error("Movement event", &id.to_string()))
    }

    /// Copia completa de la bitácora para las agregaciones
    pub async fn snapshot_all(&self) -> Vec<MovementEvent> {
        let tables = self.db.read().await;
        tables.movement_events.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{Vehicle, VehicleStatus};

    fn test_vehicle(owner: Uuid) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate_number: "ABC123".to_string(),
            brand: "Isuzu".to_string(),
            model: "Giga".to_string(),
            capacity: "12t".to_string(),
            company: "Norte SA".to_string(),
            owner,
            status: VehicleStatus::Active,
            current_status: CurrentStatus::Available,
            last_log_time: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_vehicle_is_soft_skipped() {
        let db = Database::new();
        let repo = MovementRepository::new(db.clone());
        let user = Uuid::new_v4();

        let vehicle = test_vehicle(user);
        db.write().await.vehicles.insert(vehicle.id, vehicle.clone());

        let entries = vec![
            MovementEntry {
                vehicle_id: Uuid::new_v4(), // no existe
                count: 1,
            },
            MovementEntry {
                vehicle_id: vehicle.id,
                count: 1,
            },
        ];

        let outcome = repo
            .ingest_batch(&entries, LogType::In, None, None, user)
            .await;

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.created[0].vehicle_id, vehicle.id);

        let stored = db.read().await.vehicles[&vehicle.id].clone();
        assert_eq!(stored.current_status, CurrentStatus::In);
        assert!(stored.last_log_time.is_some());
    }

    #[tokio::test]
    async fn test_zero_count_entries_are_ignored() {
        let db = Database::new();
        let repo = MovementRepository::new(db.clone());
        let user = Uuid::new_v4();

        let vehicle = test_vehicle(user);
        db.write().await.vehicles.insert(vehicle.id, vehicle.clone());

        let entries = vec![MovementEntry {
            vehicle_id: vehicle.id,
            count: 0,
        }];

        let outcome = repo
            .ingest_batch(&entries, LogType::In, None, None, user)
            .await;

        assert!(outcome.created.is_empty());
        assert_eq!(outcome.skipped, 0);
        // La proyección no se toca
        let stored = db.read().await.vehicles[&vehicle.id].clone();
        assert_eq!(stored.current_status, CurrentStatus::Available);
    }

    #[tokio::test]
    async fn test_last_accepted_event_wins_projection() {
        let db = Database::new();
        let repo = MovementRepository::new(db.clone());
        let user = Uuid::new_v4();

        let vehicle = test_vehicle(user);
        db.write().await.vehicles.insert(vehicle.id, vehicle.clone());

        let entry = vec![MovementEntry {
            vehicle_id: vehicle.id,
            count: 1,
        }];

        repo.ingest_batch(&entry, LogType::In, None, None, user).await;
        repo.ingest_batch(&entry, LogType::Out, None, None, user).await;

        let stored = db.read().await.vehicles[&vehicle.id].clone();
        assert_eq!(stored.current_status, CurrentStatus::Out);
        // Ambos eventos quedan en la bitácora
        assert_eq!(db.read().await.movement_events.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_immune_to_later_vehicle_edits() {
        let db = Database::new();
        let repo = MovementRepository::new(db.clone());
        let user = Uuid::new_v4();

        let vehicle = test_vehicle(user);
        db.write().await.vehicles.insert(vehicle.id, vehicle.clone());

        let entry = vec![MovementEntry {
            vehicle_id: vehicle.id,
            count: 1,
        }];
        let outcome = repo
            .ingest_batch(&entry, LogType::In, None, None, user)
            .await;
        let event_id = outcome.created[0].id;

        // Editar el vehículo después del registro
        db.write()
            .await
            .vehicles
            .get_mut(&vehicle.id)
            .unwrap()
            .plate_number = "XYZ999".to_string();

        let stored = db.read().await.movement_events[&event_id].clone();
        assert_eq!(stored.plate_number, "ABC123");
    }
}
