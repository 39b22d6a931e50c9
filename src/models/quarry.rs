//! Modelo de Quarry
//!
//! Cantera registrada por un administrador. El número de permiso es único.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuarryStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quarry {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub operator: String,
    pub permit_number: String,
    pub status: QuarryStatus,
    pub quarry_owner: String,
    pub contact_number: Option<String>,
    pub description: Option<String>,
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
}
