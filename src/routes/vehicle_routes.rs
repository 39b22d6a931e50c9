use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::{ApiResponse, ListResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/all", get(list_all_vehicles))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    let vehicle = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle))))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    let vehicle = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

/// Vehículos del usuario autenticado
async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ListResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    let vehicles = controller.list_owned(&user, &filters).await;
    Ok(Json(ListResponse::new(vehicles)))
}

/// Vehículos de todos los dueños (solo admin)
async fn list_all_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ListResponse<Vehicle>>, AppError> {
    user.ensure_admin()?;
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    let vehicles = controller.list_all(&filters).await;
    Ok(Json(ListResponse::new(vehicles)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    let vehicle = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.db.clone(), state.notifier.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehicle deleted successfully"
    })))
}
