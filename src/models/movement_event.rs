//! Modelo de MovementEvent
//!
//! Fila de la bitácora de movimientos (append-only). Los campos
//! `plate_number`, `brand` y `company` son un snapshot del vehículo
//! tomado al momento de escribir: ediciones posteriores del vehículo
//! no alteran el historial. Inmutable salvo borrado administrativo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::LogType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementEvent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    // Snapshot del vehículo al momento del registro
    pub plate_number: String,
    pub brand: String,
    pub company: String,
    pub log_type: LogType,
    pub log_date: DateTime<Utc>,
    /// Hora local formateada en reloj de 12 horas, ej. "02:45:10 PM"
    pub log_time: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
