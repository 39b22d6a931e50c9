use uuid::Uuid;

use crate::database::Database;
use crate::dto::quarry_dto::UpdateQuarryRequest;
use crate::models::quarry::Quarry;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct QuarryRepository {
    db: Database,
}

impl QuarryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insertar una cantera; el número de permiso debe ser único
    pub async fn insert(&self, quarry: Quarry) -> AppResult<Quarry> {
        let mut tables = self.db.write().await;

        if tables
            .quarries
            .values()
            .any(|q| q.permit_number == quarry.permit_number)
        {
            return Err(conflict_error("Quarry", "permit number", &quarry.permit_number));
        }

        tables.quarries.insert(quarry.id, quarry.clone());
        Ok(quarry)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Quarry> {
        let tables = self.db.read().await;
        tables.quarries.get(&id).cloned()
    }

    pub async fn list(&self) -> Vec<Quarry> {
        let tables = self.db.read().await;
        let mut quarries: Vec<Quarry> = tables.quarries.values().cloned().collect();
        quarries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        quarries
    }

    /// Actualizar una cantera. Si cambia el permiso se re-verifica la
    /// unicidad excluyendo el propio id.
    pub async fn update(&self, id: Uuid, patch: UpdateQuarryRequest) -> AppResult<Quarry> {
        let mut tables = self.db.write().await;

        if !tables.quarries.contains_key(&id) {
            return Err(not_found_error("Quarry", &id.to_string()));
        }

        if let Some(permit) = &patch.permit_number {
            if tables
                .quarries
                .values()
                .any(|q| q.id != id && &q.permit_number == permit)
            {
                return Err(conflict_error("Quarry", "permit number", permit));
            }
        }

        let quarry = tables
            .quarries
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Quarry", &id.to_string()))?;

        if let Some(name) = patch.name {
            quarry.name = name;
        }
        if let Some(location) = patch.location {
            quarry.location = location;
        }
        if let Some(operator) = patch.operator {
            quarry.operator = operator;
        }
        if let Some(permit_number) = patch.permit_number {
            quarry.permit_number = permit_number;
        }
        if let Some(status) = patch.status {
            quarry.status = status;
        }
        if let Some(quarry_owner) = patch.quarry_owner {
            quarry.quarry_owner = quarry_owner;
        }
        if let Some(contact_number) = patch.contact_number {
            quarry.contact_number = Some(contact_number);
        }
        if let Some(description) = patch.description {
            quarry.description = Some(description);
        }

        Ok(quarry.clone())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Quarry> {
        let mut tables = self.db.write().await;
        tables
            .quarries
            .remove(&id)
            .ok_or_else(|| not_found_error("Quarry", &id.to_string()))
    }
}
