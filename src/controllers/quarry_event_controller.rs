//! Controller de la bitácora agregada por cantera
//!
//! A diferencia de la bitácora por vehículo, aquí una referencia que no
//! resuelve rechaza la operación completa antes de escribir nada.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::dto::quarry_event_dto::{
    CreateQuarryEventRequest, QuarryEventFilters, QuarryStatsQuery, UpdateQuarryEventRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::quarry_event::QuarryAggregateEvent;
use crate::realtime::Notifier;
use crate::repositories::quarry_event_repository::QuarryEventRepository;
use crate::services::aggregation_service::{aggregate_quarry_events, QuarryLogStat};
use crate::utils::errors::{not_found_error, AppError};

pub struct QuarryEventController {
    repository: QuarryEventRepository,
    notifier: Arc<dyn Notifier>,
}

impl QuarryEventController {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository: QuarryEventRepository::new(db),
            notifier,
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateQuarryEventRequest,
    ) -> Result<QuarryAggregateEvent, AppError> {
        request.validate()?;

        let event = self
            .repository
            .create(
                request.quarry_id,
                request.log_type,
                request.truck_count,
                request.notes,
                request.log_date,
                user.user_id,
            )
            .await?;

        self.notifier
            .publish("quarry_event:created", json!(event))
            .await;

        Ok(event)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<QuarryAggregateEvent, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Quarry aggregate event", &id.to_string()))
    }

    pub async fn list(&self, filters: &QuarryEventFilters) -> Vec<QuarryAggregateEvent> {
        self.repository.list(filters).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateQuarryEventRequest,
    ) -> Result<QuarryAggregateEvent, AppError> {
        request.validate()?;

        let event = self.repository.update(id, request).await?;

        self.notifier
            .publish("quarry_event:updated", json!(event))
            .await;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        self.notifier
            .publish("quarry_event:deleted", json!({ "id": id }))
            .await;

        Ok(())
    }

    /// Totales por tipo: camiones sumados y filas contadas
    pub async fn stats(&self, query: &QuarryStatsQuery) -> Vec<QuarryLogStat> {
        let events = self.repository.snapshot_all().await;
        aggregate_quarry_events(&events, query.quarry_id, query.start_date, query.end_date)
    }
}
