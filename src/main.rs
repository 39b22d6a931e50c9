use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use quarry_tracking::config::environment::EnvironmentConfig;
use quarry_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("⛰️ Quarry Tracking - Backend de movimientos");
    info!("===========================================");
    info!("🔧 Entorno: {}", config.environment);

    let state = AppState::new(config.clone());
    let app = quarry_tracking::app(state);

    let addr = config.server_url();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Servidor iniciado en http://{}", addr);
    info!("📦 Health check: http://{}/health", addr);
    info!("📡 WebSocket: ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Error instalando handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Error instalando handler de SIGTERM: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de apagado recibida, cerrando servidor...");
}
