use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::quarry_event::QuarryLogType;

/// Request para crear un evento agregado de cantera.
/// La cantera referenciada debe existir: si no, la operación completa
/// se rechaza (sin el skip suave de la bitácora por vehículo).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuarryEventRequest {
    pub quarry_id: Uuid,

    pub log_type: QuarryLogType,

    #[validate(range(min = 1))]
    pub truck_count: u32,

    pub notes: Option<String>,

    pub log_date: Option<DateTime<Utc>>,
}

/// Request de actualización: solo truck_count, notes y log_date.
/// `quarry_id` y `log_type` son inmutables después de la creación.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuarryEventRequest {
    #[validate(range(min = 1))]
    pub truck_count: Option<u32>,

    pub notes: Option<String>,

    pub log_date: Option<DateTime<Utc>>,
}

/// Filtros para el listado de eventos agregados
#[derive(Debug, Default, Deserialize)]
pub struct QuarryEventFilters {
    pub log_type: Option<QuarryLogType>,
    pub quarry_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Rango para la agregación por cantera
#[derive(Debug, Default, Deserialize)]
pub struct QuarryStatsQuery {
    pub quarry_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
