//! Notificador en tiempo real
//!
//! Fan-out best-effort de mutaciones hacia los observadores conectados.
//! El `Notifier` es una capacidad inyectada en los controllers: publicar
//! nunca bloquea la respuesta ni hace fallar la escritura ya confirmada.
//! Sin suscriptores, publicar es un no-op. No hay persistencia ni replay.

use async_trait::async_trait;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::state::AppState;

/// Sobre que viaja por el canal y hacia los WebSockets
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeMessage {
    pub event: String,
    pub data: serde_json::Value,
}

/// Capacidad de publicación inyectada en los controllers
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, payload: serde_json::Value);
}

/// Implementación nula: nadie escucha y no pasa nada
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn publish(&self, _topic: &str, _payload: serde_json::Value) {}
}

/// Hub de difusión respaldado por un canal broadcast de tokio
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    tx: broadcast::Sender<RealtimeMessage>,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeMessage> {
        self.tx.subscribe()
    }

    /// Número de observadores conectados en este momento
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Notifier for RealtimeHub {
    async fn publish(&self, topic: &str, payload: serde_json::Value) {
        let message = RealtimeMessage {
            event: topic.to_string(),
            data: payload,
        };
        // Un Err solo significa que no hay receptores: silencioso por contrato
        if let Err(e) = self.tx.send(message) {
            tracing::debug!("realtime: sin suscriptores para '{}': {}", topic, e);
        }
    }
}

/// Handler del endpoint `GET /ws`
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| client_connection(socket, state.hub.clone()))
}

/// Reenvía cada mensaje publicado al cliente como frame de texto JSON.
/// Si el envío falla o el cliente cierra, la conexión se descarta.
async fn client_connection(socket: WebSocket, hub: RealtimeHub) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = hub.subscribe();

    let mut forward_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    let text = match serde_json::to_string(&message) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("realtime: error serializando evento: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                // Cliente lento: se pierden mensajes, sin garantía de entrega
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("realtime: cliente rezagado, {} mensajes omitidos", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        // Solo nos interesa detectar el cierre del cliente
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward_task => recv_task.abort(),
        _ = &mut recv_task => forward_task.abort(),
    }

    tracing::debug!("realtime: cliente desconectado");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = RealtimeHub::new(8);
        // No debe entrar en pánico ni bloquear
        hub.publish("vehicle:created", json!({"id": "x"})).await;
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_message() {
        let hub = RealtimeHub::new(8);
        let mut rx = hub.subscribe();

        hub.publish("quarry:updated", json!({"name": "Norte"})).await;

        let message = rx.recv().await.unwrap();
        assert_eq!(message.event, "quarry:updated");
        assert_eq!(message.data["name"], "Norte");
    }

    #[tokio::test]
    async fn test_noop_notifier() {
        let notifier = NoopNotifier;
        notifier.publish("movement_event:created", json!([])).await;
    }
}
