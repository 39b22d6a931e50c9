use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{CurrentStatus, Vehicle, VehicleStatus};
use crate::realtime::Notifier;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_plate;

pub struct VehicleController {
    repository: VehicleRepository,
    notifier: Arc<dyn Notifier>,
}

impl VehicleController {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository: VehicleRepository::new(db),
            notifier,
        }
    }

    /// Crear un vehículo para el usuario autenticado. La placa se
    /// normaliza a mayúsculas antes del chequeo de unicidad.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate_number: normalize_plate(&request.plate_number),
            brand: request.brand,
            model: request.model,
            capacity: request.capacity,
            company: request.company,
            owner: user.user_id,
            status: request.status.unwrap_or(VehicleStatus::Active),
            current_status: CurrentStatus::Available,
            last_log_time: None,
            created_at: Utc::now(),
        };

        let vehicle = self.repository.insert(vehicle).await?;
        tracing::info!("🚚 Vehículo creado: {} ({})", vehicle.plate_number, vehicle.id);

        self.notifier
            .publish("vehicle:created", json!(vehicle))
            .await;

        Ok(vehicle)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    /// Listado con scope del dueño (el caller) y filtro opcional de estado
    pub async fn list_owned(
        &self,
        user: &AuthenticatedUser,
        filters: &VehicleFilters,
    ) -> Vec<Vehicle> {
        self.repository
            .list(Some(user.user_id), filters.current_status)
            .await
    }

    /// Listado de todos los dueños; la ruta lo restringe a admins
    pub async fn list_all(&self, filters: &VehicleFilters) -> Vec<Vehicle> {
        self.repository.list(None, filters.current_status).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;

        let vehicle = self.repository.update(id, request).await?;

        self.notifier
            .publish("vehicle:updated", json!(vehicle))
            .await;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        self.notifier
            .publish("vehicle:deleted", json!({ "id": id }))
            .await;

        Ok(())
    }
}
