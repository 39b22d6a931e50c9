use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{CurrentStatus, VehicleStatus};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(
        length(min = 1, max = 20),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub plate_number: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1, max = 50))]
    pub capacity: String,

    #[validate(length(min = 1, max = 100))]
    pub company: String,

    pub status: Option<VehicleStatus>,
}

/// Request para actualizar un vehículo existente.
/// `current_status` no es parchable: solo la bitácora lo deriva.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub capacity: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub company: Option<String>,

    pub status: Option<VehicleStatus>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub current_status: Option<CurrentStatus>,
}
