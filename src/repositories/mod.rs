//! Repositorios de acceso al almacén
//!
//! Un repositorio por entidad, construido sobre el handle `Database`.
//! Las verificaciones de unicidad y de referencias se hacen bajo el
//! mismo write guard que la escritura, así que son atómicas.

pub mod movement_repository;
pub mod quarry_event_repository;
pub mod quarry_repository;
pub mod vehicle_repository;
