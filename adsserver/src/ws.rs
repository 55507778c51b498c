//! Endpoint WebSocket des écrans
//!
//! Une tâche par connexion : le canal sortant du registre est drainé vers le
//! socket, le texte entrant est traité comme un heartbeat et simplement
//! tracé. Fermeture ou erreur → retrait du registre.

use crate::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::registry::ScreenRegistry;

/// Handler d'upgrade `GET /ws`
pub async fn ws_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    info!(remote_addr = %addr, "WebSocket connection request");
    ws.on_upgrade(move |socket| handle_socket(socket, addr, state.registry.clone()))
}

async fn handle_socket(socket: WebSocket, addr: SocketAddr, registry: Arc<ScreenRegistry>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let id = registry.register(addr.to_string(), tx);

    loop {
        tokio::select! {
            // Notifications du dispatcher vers l'écran
            outbound = rx.recv() => {
                match outbound {
                    Some(text) => {
                        if ws_tx.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            // Trafic entrant de l'écran : heartbeat / ping / fermeture
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        debug!(screen = %id, payload = %text, "Heartbeat / message");
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_tx.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!(screen = %id, error = %e, "WebSocket error");
                        break;
                    }
                    Some(Ok(_)) => {} // frames binaires ignorées
                }
            }
        }
    }

    registry.unregister(id);
}
