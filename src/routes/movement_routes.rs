use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::movement_controller::MovementController;
use crate::dto::common::ListResponse;
use crate::dto::movement_dto::{CreateMovementBatchRequest, MovementFilters, StatsQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::movement_event::MovementEvent;
use crate::services::aggregation_service::MovementDayStat;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movements).post(create_movement_batch))
        .route("/all", get(list_all_movements))
        .route("/stats", get(movement_stats))
        .route("/:id", delete(delete_movement))
}

/// Ingesta por lote. La respuesta lleva `count = creados`; las entradas
/// saltadas se derivan comparando contra lo solicitado.
async fn create_movement_batch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMovementBatchRequest>,
) -> Result<(StatusCode, Json<ListResponse<MovementEvent>>), AppError> {
    let controller = MovementController::new(state.db.clone(), state.notifier.clone());
    let outcome = controller.create_batch(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ListResponse::new(outcome.created)),
    ))
}

/// Bitácora del usuario autenticado
async fn list_movements(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<MovementFilters>,
) -> Result<Json<ListResponse<MovementEvent>>, AppError> {
    let controller = MovementController::new(state.db.clone(), state.notifier.clone());
    let events = controller.list(&user, &filters).await;
    Ok(Json(ListResponse::new(events)))
}

/// Bitácora completa de todos los usuarios (solo admin)
async fn list_all_movements(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<MovementFilters>,
) -> Result<Json<ListResponse<MovementEvent>>, AppError> {
    user.ensure_admin()?;
    let controller = MovementController::new(state.db.clone(), state.notifier.clone());
    let events = controller.list_all(&filters).await;
    Ok(Json(ListResponse::new(events)))
}

/// Resumen diario agrupado por (día, tipo)
async fn movement_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ListResponse<MovementDayStat>>, AppError> {
    let controller = MovementController::new(state.db.clone(), state.notifier.clone());
    let stats = controller.stats(&query).await;
    Ok(Json(ListResponse::new(stats)))
}

/// Borrado administrativo; no recalcula la proyección del vehículo
async fn delete_movement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.ensure_admin()?;
    let controller = MovementController::new(state.db.clone(), state.notifier.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Movement event deleted"
    })))
}
