use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quarry_controller::QuarryController;
use crate::dto::common::{ApiResponse, ListResponse};
use crate::dto::quarry_dto::{CreateQuarryRequest, UpdateQuarryRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::quarry::Quarry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quarries).post(create_quarry))
        .route(
            "/:id",
            get(get_quarry).put(update_quarry).delete(delete_quarry),
        )
}

async fn list_quarries(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Quarry>>, AppError> {
    let controller = QuarryController::new(state.db.clone(), state.notifier.clone());
    let quarries = controller.list().await;
    Ok(Json(ListResponse::new(quarries)))
}

async fn get_quarry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Quarry>>, AppError> {
    let controller = QuarryController::new(state.db.clone(), state.notifier.clone());
    let quarry = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(quarry)))
}

async fn create_quarry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateQuarryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Quarry>>), AppError> {
    user.ensure_admin()?;
    let controller = QuarryController::new(state.db.clone(), state.notifier.clone());
    let quarry = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(quarry))))
}

async fn update_quarry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuarryRequest>,
) -> Result<Json<ApiResponse<Quarry>>, AppError> {
    user.ensure_admin()?;
    let controller = QuarryController::new(state.db.clone(), state.notifier.clone());
    let quarry = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(quarry)))
}

async fn delete_quarry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.ensure_admin()?;
    let controller = QuarryController::new(state.db.clone(), state.notifier.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Quarry deleted successfully"
    })))
}
