//! Services module
//!
//! Este módulo contiene la lógica de negocio reutilizable de la
//! aplicación; hoy, el motor de agregación de las bitácoras.

pub mod aggregation_service;

pub use aggregation_service::*;
