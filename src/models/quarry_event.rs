//! Modelo de QuarryAggregateEvent
//!
//! Bitácora agregada a nivel de cantera: cada fila registra un conteo
//! de camiones (truck_count >= 1) que entraron o salieron. La referencia
//! a la cantera y el tipo de evento son inmutables después de crearse;
//! `truck_count`, `notes` y `log_date` sí admiten edición.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de evento agregado; en el wire viaja en minúsculas (in/out)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuarryLogType {
    In,
    Out,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarryAggregateEvent {
    pub id: Uuid,
    pub quarry_id: Uuid,
    pub log_type: QuarryLogType,
    pub truck_count: u32,
    pub notes: Option<String>,
    pub logged_by: Uuid,
    pub log_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
