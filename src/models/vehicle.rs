//! Modelo de Vehicle
//!
//! Vehículo pesado registrado por un operador. La placa se guarda
//! normalizada en mayúsculas y es única de forma case-insensitive.
//! `current_status` es una proyección derivada de la bitácora de
//! movimientos: solo la ruta de escritura de movimientos la modifica.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ciclo de vida del vehículo en el registro
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    Inactive,
}

/// Estado actual derivado de la bitácora (IN/OUT), o AVAILABLE sin eventos
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrentStatus {
    In,
    Out,
    Available,
}

/// Tipo de evento de movimiento registrado en la bitácora
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    In,
    Out,
}

impl From<LogType> for CurrentStatus {
    fn from(log_type: LogType) -> Self {
        match log_type {
            LogType::In => CurrentStatus::In,
            LogType::Out => CurrentStatus::Out,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub capacity: String,
    pub company: String,
    pub owner: Uuid,
    pub status: VehicleStatus,
    pub current_status: CurrentStatus,
    pub last_log_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
