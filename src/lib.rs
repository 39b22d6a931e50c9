//! Quarry Tracking Backend
//!
//! Libro mayor de movimientos de vehículos pesados en canteras:
//! ingesta por lote de eventos IN/OUT, proyección de estado actual por
//! vehículo, registros agregados por cantera y difusión en tiempo real
//! por WebSocket.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod realtime;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

/// Construir el router completo de la aplicación.
/// Todo lo que cuelga de `/api` pasa por el gate de autorización;
/// `/health` y `/ws` quedan fuera.
pub fn app(state: AppState) -> Router {
    // Sin orígenes configurados (dev y tests) el CORS es permisivo
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    let api_routes = Router::new()
        .nest("/vehicles", routes::vehicle_routes::router())
        .nest("/movement-logs", routes::movement_routes::router())
        .nest("/quarries", routes::quarry_routes::router())
        .nest("/quarry-logs", routes::quarry_event_routes::router())
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(realtime::ws_handler))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "quarry-tracking-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
