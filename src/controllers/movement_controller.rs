//! Controller de la bitácora de movimientos
//!
//! Ingesta por lote, listados con scope, agregación diaria y borrado
//! administrativo. El batch completo se rechaza solo por forma inválida
//! (vacío o tipo no reconocido); una referencia de vehículo que no
//! resuelve es un fallo suave por entrada, no un abort.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::dto::movement_dto::{CreateMovementBatchRequest, MovementFilters, StatsQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::movement_event::MovementEvent;
use crate::realtime::Notifier;
use crate::repositories::movement_repository::{BatchOutcome, MovementRepository};
use crate::services::aggregation_service::{aggregate_movements, MovementDayStat};
use crate::utils::errors::AppError;

pub struct MovementController {
    repository: MovementRepository,
    notifier: Arc<dyn Notifier>,
}

impl MovementController {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository: MovementRepository::new(db),
            notifier,
        }
    }

    /// Ingesta por lote. Devuelve los eventos creados y cuántas entradas
    /// se saltaron; el caller puede derivar los skips comparando con lo
    /// solicitado. Publica un único fan-out por batch exitoso.
    pub async fn create_batch(
        &self,
        user: &AuthenticatedUser,
        request: CreateMovementBatchRequest,
    ) -> Result<BatchOutcome, AppError> {
        request.validate()?;

        let outcome = self
            .repository
            .ingest_batch(
                &request.logs,
                request.log_type,
                request.log_date,
                request.log_time,
                user.user_id,
            )
            .await;

        tracing::info!(
            "📋 Batch de movimientos: {} creados, {} saltados",
            outcome.created.len(),
            outcome.skipped
        );

        // Un solo publish por batch, con el contexto del lote
        self.notifier
            .publish(
                "movement_event:created",
                json!({
                    "logs": outcome.created,
                    "log_type": request.log_type,
                    "log_date": request.log_date,
                }),
            )
            .await;

        Ok(outcome)
    }

    /// Bitácora del usuario autenticado
    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        filters: &MovementFilters,
    ) -> Vec<MovementEvent> {
        self.repository.list(filters, Some(user.user_id)).await
    }

    /// Bitácora completa, de todos los usuarios; solo admins
    pub async fn list_all(&self, filters: &MovementFilters) -> Vec<MovementEvent> {
        self.repository.list(filters, None).await
    }

    /// Resumen diario por tipo de evento, día más reciente primero
    pub async fn stats(&self, query: &StatsQuery) -> Vec<MovementDayStat> {
        let events = self.repository.snapshot_all().await;
        aggregate_movements(&events, query.start_date, query.end_date)
    }

    /// Borrado administrativo de un evento. La proyección del vehículo
    /// no se recalcula: el historial borrado no reescribe el presente.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        self.notifier
            .publish("movement_event:deleted", json!({ "id": id }))
            .await;

        Ok(())
    }
}
