//! Controllers del sistema
//!
//! Reglas de negocio por entidad; las rutas quedan delgadas. Cada
//! controller recibe el handle de base de datos y el notificador
//! inyectado: toda mutación aceptada publica exactamente un evento
//! `<entidad>:<created|updated|deleted>` después de confirmarse.

pub mod movement_controller;
pub mod quarry_controller;
pub mod quarry_event_controller;
pub mod vehicle_controller;
