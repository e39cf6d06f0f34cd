//! WebSocket stream of timer events
//!
//! Clients receive a snapshot frame on connect, then every timer event as a
//! JSON text frame.

use std::sync::Arc;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, warn};

use crate::state::AppState;

/// Handle GET /events - upgrade to a timer event stream
pub async fn events_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before taking the snapshot so no event falls in between
    let mut event_rx = state.timer_event_tx.subscribe();

    let snapshot = match state.timer_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read timer for new client: {}", e);
            return;
        }
    };
    let init = json!({ "event": "snapshot", "timer": snapshot }).to_string();
    if let Err(e) = sender.send(Message::Text(init)).await {
        warn!("Failed to send initial snapshot: {}", e);
        return;
    }

    debug!("Event client connected");

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Event client disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("Event client connection error: {}", e);
                        break;
                    }
                }
            }

            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        let frame = match serde_json::to_string(&event) {
                            Ok(frame) => frame,
                            Err(e) => {
                                error!("Failed to serialize {} event: {}", event.name(), e);
                                continue;
                            }
                        };
                        if sender.send(Message::Text(frame)).await.is_err() {
                            debug!("Event client went away");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Event client lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}
