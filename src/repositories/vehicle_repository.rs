use uuid::Uuid;

use crate::database::Database;
use crate::dto::vehicle_dto::UpdateVehicleRequest;
use crate::models::vehicle::{CurrentStatus, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::normalize_plate;

pub struct VehicleRepository {
    db: Database,
}

impl VehicleRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insertar un vehículo nuevo. La placa debe venir ya normalizada;
    /// la unicidad se verifica contra las placas almacenadas (todas en
    /// mayúsculas) bajo el mismo write guard que la inserción.
    pub async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.db.write().await;

        if tables
            .vehicles
            .values()
            .any(|v| v.plate_number == vehicle.plate_number)
        {
            return Err(conflict_error("Vehicle", "plate number", &vehicle.plate_number));
        }

        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Vehicle> {
        let tables = self.db.read().await;
        tables.vehicles.get(&id).cloned()
    }

    /// Listar vehículos, más recientes primero. `owner = None` lista
    /// todos los dueños (scope privilegiado).
    pub async fn list(
        &self,
        owner: Option<Uuid>,
        current_status: Option<CurrentStatus>,
    ) -> Vec<Vehicle> {
        let tables = self.db.read().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .values()
            .filter(|v| owner.map_or(true, |o| v.owner == o))
            .filter(|v| current_status.map_or(true, |s| v.current_status == s))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        vehicles
    }

    /// Actualizar metadata del vehículo. Si el patch cambia la placa se
    /// re-normaliza y se re-verifica la unicidad excluyendo el propio id.
    pub async fn update(&self, id: Uuid, patch: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let mut tables = self.db.write().await;

        if !tables.vehicles.contains_key(&id) {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        let new_plate = match &patch.plate_number {
            Some(plate) => {
                let plate = normalize_plate(plate);
                if tables
                    .vehicles
                    .values()
                    .any(|v| v.id != id && v.plate_number == plate)
                {
                    return Err(conflict_error("Vehicle", "plate number", &plate));
                }
                Some(plate)
            }
            None => None,
        };

        let vehicle = tables
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if let Some(plate) = new_plate {
            vehicle.plate_number = plate;
        }
        if let Some(brand) = patch.brand {
            vehicle.brand = brand;
        }
        if let Some(model) = patch.model {
            vehicle.model = model;
        }
        if let Some(capacity) = patch.capacity {
            vehicle.capacity = capacity;
        }
        if let Some(company) = patch.company {
            vehicle.company = company;
        }
        if let Some(status) = patch.status {
            vehicle.status = status;
        }

        Ok(vehicle.clone())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Vehicle> {
        let mut tables = self.db.write().await;
        tables
            .vehicles
            .remove(&id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }
}
