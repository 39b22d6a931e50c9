//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del registro de canteras:
//! vehículos, eventos de movimiento y bitácoras agregadas por cantera.

pub mod movement_event;
pub mod quarry;
pub mod quarry_event;
pub mod vehicle;
