//! Rutas del libro mayor de canteras. Todas las operaciones son
//! administrativas, por eso el router entero pasa por `require_admin`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quarry_event_controller::QuarryEventController;
use crate::dto::common::{ApiResponse, ListResponse};
use crate::dto::quarry_event_dto::{
    CreateQuarryEventRequest, QuarryEventFilters, QuarryStatsQuery, UpdateQuarryEventRequest,
};
use crate::middleware::auth::{require_admin, AuthenticatedUser};
use crate::models::quarry_event::QuarryAggregateEvent;
use crate::services::aggregation_service::QuarryLogStat;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quarry_events).post(create_quarry_event))
        .route("/stats", get(quarry_event_stats))
        .route(
            "/:id",
            get(get_quarry_event)
                .put(update_quarry_event)
                .delete(delete_quarry_event),
        )
        .route_layer(from_fn(require_admin))
}

async fn create_quarry_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateQuarryEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuarryAggregateEvent>>), AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    let event = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(event))))
}

async fn get_quarry_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<QuarryAggregateEvent>>, AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    let event = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(event)))
}

async fn list_quarry_events(
    State(state): State<AppState>,
    Query(filters): Query<QuarryEventFilters>,
) -> Result<Json<ListResponse<QuarryAggregateEvent>>, AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    let events = controller.list(&filters).await;
    Ok(Json(ListResponse::new(events)))
}

/// Totales de camiones y registros agrupados por tipo de evento
async fn quarry_event_stats(
    State(state): State<AppState>,
    Query(query): Query<QuarryStatsQuery>,
) -> Result<Json<ListResponse<QuarryLogStat>>, AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    let stats = controller.stats(&query).await;
    Ok(Json(ListResponse::new(stats)))
}

async fn update_quarry_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuarryEventRequest>,
) -> Result<Json<ApiResponse<QuarryAggregateEvent>>, AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    let event = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(event)))
}

async fn delete_quarry_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = QuarryEventController::new(state.db.clone(), state.notifier.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Quarry log deleted successfully"
    })))
}
