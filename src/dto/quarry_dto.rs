use serde::Deserialize;
use validator::Validate;

use crate::models::quarry::QuarryStatus;

/// Request para registrar una cantera
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuarryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, max = 100))]
    pub operator: String,

    #[validate(length(min = 1, max = 50))]
    pub permit_number: String,

    pub status: Option<QuarryStatus>,

    #[validate(length(min = 1, max = 100))]
    pub quarry_owner: String,

    #[validate(custom = "crate::utils::validation::validate_contact_number")]
    pub contact_number: Option<String>,

    pub description: Option<String>,
}

/// Request para actualizar una cantera
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuarryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub operator: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub permit_number: Option<String>,

    pub status: Option<QuarryStatus>,

    #[validate(length(min = 1, max = 100))]
    pub quarry_owner: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_contact_number")]
    pub contact_number: Option<String>,

    pub description: Option<String>,
}
