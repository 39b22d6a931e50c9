use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::dto::quarry_dto::{CreateQuarryRequest, UpdateQuarryRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::quarry::{Quarry, QuarryStatus};
use crate::realtime::Notifier;
use crate::repositories::quarry_repository::QuarryRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct QuarryController {
    repository: QuarryRepository,
    notifier: Arc<dyn Notifier>,
}

impl QuarryController {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository: QuarryRepository::new(db),
            notifier,
        }
    }

    /// Registrar una cantera; el número de permiso debe ser único
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateQuarryRequest,
    ) -> Result<Quarry, AppError> {
        request.validate()?;

        let quarry = Quarry {
            id: Uuid::new_v4(),
            name: request.name,
            location: request.location,
            operator: request.operator,
            permit_number: request.permit_number,
            status: request.status.unwrap_or(QuarryStatus::Active),
            quarry_owner: request.quarry_owner,
            contact_number: request.contact_number,
            description: request.description,
            added_by: user.user_id,
            created_at: Utc::now(),
        };

        let quarry = self.repository.insert(quarry).await?;
        tracing::info!("⛰️  Cantera registrada: {} ({})", quarry.name, quarry.id);

        self.notifier.publish("quarry:created", json!(quarry)).await;

        Ok(quarry)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Quarry, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Quarry", &id.to_string()))
    }

    pub async fn list(&self) -> Vec<Quarry> {
        self.repository.list().await
    }

    pub async fn update(&self, id: Uuid, request: UpdateQuarryRequest) -> Result<Quarry, AppError> {
        request.validate()?;

        let quarry = self.repository.update(id, request).await?;

        self.notifier.publish("quarry:updated", json!(quarry)).await;

        Ok(quarry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        self.notifier
            .publish("quarry:deleted", json!({ "id": id }))
            .await;

        Ok(())
    }
}
