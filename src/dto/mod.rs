//! DTOs de la API
//!
//! Requests con validación, filtros de query y envelopes de respuesta.

pub mod common;
pub mod movement_dto;
pub mod quarry_dto;
pub mod quarry_event_dto;
pub mod vehicle_dto;
