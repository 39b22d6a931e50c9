//! Tests de integración de la bitácora de movimientos y vehículos.
//! Cada test levanta su propio router con estado en memoria y
//! ejecuta requests con `oneshot`, sin red de por medio.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use quarry_tracking::config::environment::EnvironmentConfig;
use quarry_tracking::middleware::auth::{generate_token, Role};
use quarry_tracking::state::AppState;

fn test_app() -> (Router, EnvironmentConfig) {
    let config = EnvironmentConfig::default();
    let state = AppState::new(config.clone());
    (quarry_tracking::app(state), config)
}

fn token_for(role: Role, config: &EnvironmentConfig) -> String {
    generate_token(Uuid::new_v4(), role, config).unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn vehicle_body(plate: &str) -> Value {
    json!({
        "plate_number": plate,
        "brand": "Isuzu",
        "model": "Giga",
        "capacity": "10 wheeler",
        "company": "Mountain Aggregates",
    })
}

#[tokio::test]
async fn test_health_check_is_public() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_api_requires_token() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/api/vehicles", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_plate_uniqueness_is_case_insensitive() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("ABC123")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Misma placa en minúsculas: conflicto
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("abc123")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_batch_skips_unresolved_vehicles() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("DEF456")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vehicle_id = created["data"]["id"].as_str().unwrap().to_string();

    // Una referencia rota y una válida: el batch entra con una creada
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/movement-logs",
        Some(&token),
        Some(json!({
            "logs": [
                { "vehicle_id": Uuid::new_v4(), "count": 1 },
                { "vehicle_id": vehicle_id, "count": 1 },
            ],
            "log_type": "IN",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["log_type"], "IN");

    // La proyección del vehículo refleja el evento aceptado
    let uri = format!("/api/vehicles/{}", vehicle_id);
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_status"], "IN");
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/movement-logs",
        Some(&token),
        Some(json!({ "logs": [], "log_type": "OUT" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_projection_follows_latest_event() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("GHI789")),
    )
    .await;
    let vehicle_id = created["data"]["id"].as_str().unwrap().to_string();

    for log_type in ["IN", "OUT"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/movement-logs",
            Some(&token),
            Some(json!({
                "logs": [{ "vehicle_id": vehicle_id, "count": 1 }],
                "log_type": log_type,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // La proyección queda en el último evento, el historial conserva ambos
    let uri = format!("/api/vehicles/{}", vehicle_id);
    let (_, vehicle) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(vehicle["data"]["current_status"], "OUT");

    let (status, logs) = send(&app, Method::GET, "/api/movement-logs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logs["count"], 2);
}

#[tokio::test]
async fn test_deleting_event_keeps_projection() {
    let (app, config) = test_app();
    let admin = token_for(Role::Admin, &config);

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&admin),
        Some(vehicle_body("JKL012")),
    )
    .await;
    let vehicle_id = created["data"]["id"].as_str().unwrap().to_string();

    let (_, batch) = send(
        &app,
        Method::POST,
        "/api/movement-logs",
        Some(&admin),
        Some(json!({
            "logs": [{ "vehicle_id": vehicle_id, "count": 1 }],
            "log_type": "IN",
        })),
    )
    .await;
    let event_id = batch["data"][0]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/movement-logs/{}", event_id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    // Borrar historial no reescribe el presente del vehículo
    let uri = format!("/api/vehicles/{}", vehicle_id);
    let (_, vehicle) = send(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(vehicle["data"]["current_status"], "IN");
}

#[tokio::test]
async fn test_stats_on_empty_ledger() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/movement-logs/stats",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_admin_listing_is_forbidden_for_users() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/movement-logs/all",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_plate_uniqueness_applies_on_update() {
    let (app, config) = test_app();
    let token = token_for(Role::User, &config);

    let (_, first) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("ABC123")),
    )
    .await;
    let first_id = first["data"]["id"].as_str().unwrap().to_string();

    let (_, second) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(vehicle_body("DEF456")),
    )
    .await;
    let second_id = second["data"]["id"].as_str().unwrap().to_string();

    // Cambiar la placa del segundo a la del primero (en minúsculas): conflicto
    let uri = format!("/api/vehicles/{}", second_id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "plate_number": "abc123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // El propio vehículo sí puede recibir su placa; se guarda normalizada
    let uri = format!("/api/vehicles/{}", first_id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "plate_number": " abc123 " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["plate_number"], "ABC123");
}

#[tokio::test]
async fn test_batch_publishes_single_realtime_event() {
    use tokio::sync::broadcast::error::TryRecvError;

    let config = EnvironmentConfig::default();
    let state = AppState::new(config.clone());
    // Suscribirse antes de montar el router para observar cada publish
    let mut rx = state.hub.subscribe();
    let app = quarry_tracking::app(state);
    let token = token_for(Role::User, &config);

    let mut vehicle_ids = Vec::new();
    for plate in ["MNO345", "PQR678"] {
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/vehicles",
            Some(&token),
            Some(vehicle_body(plate)),
        )
        .await;
        vehicle_ids.push(created["data"]["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/movement-logs",
        Some(&token),
        Some(json!({
            "logs": [
                { "vehicle_id": vehicle_ids[0], "count": 1 },
                { "vehicle_id": vehicle_ids[1], "count": 1 },
            ],
            "log_type": "IN",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Un publish por cada vehículo creado
    for _ in 0..2 {
        let message = rx.recv().await.unwrap();
        assert_eq!(message.event, "vehicle:created");
    }

    // El batch completo viaja en un solo mensaje
    let message = rx.recv().await.unwrap();
    assert_eq!(message.event, "movement_event:created");
    assert_eq!(message.data["logs"].as_array().unwrap().len(), 2);
    assert_eq!(message.data["log_type"], "IN");

    // Y no hay más publishes pendientes
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}
