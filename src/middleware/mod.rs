//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación (gate JWT + roles)
//! y de CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
