use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::LogType;

/// Una entrada del batch: vehículo + conteo solicitado.
/// Entradas con `count <= 0` se ignoran sin error.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovementEntry {
    pub vehicle_id: Uuid,
    pub count: i64,
}

/// Request de ingesta por lote de eventos de movimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovementBatchRequest {
    #[validate(length(min = 1, message = "logs must not be empty"))]
    pub logs: Vec<MovementEntry>,

    pub log_type: LogType,

    /// Default: ahora
    pub log_date: Option<DateTime<Utc>>,

    /// Default: hora local formateada en reloj de 12 horas
    pub log_time: Option<String>,
}

/// Filtros para el listado de la bitácora.
/// El rango de fechas es inclusivo en ambos extremos.
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilters {
    pub log_type: Option<LogType>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Rango de fechas para las agregaciones
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
