//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::{build_worksheet, score_worksheet};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!(target: "worksheet_backend", "WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!(target: "worksheet_backend", "WebSocket connected");
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(txt) => {
                // Parse, dispatch, serialize response.
                let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
                    Ok(incoming) => {
                        debug!(target: "worksheet_backend", "WS received: {:?}", &incoming);
                        handle_client_ws(incoming, &state)
                    }
                    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
                };

                let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
                    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
                });

                if let Err(e) = socket.send(Message::Text(out)).await {
                    error!(target: "worksheet_backend", error = %e, "WS send error");
                    break;
                }
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    info!(target: "worksheet_backend", "WebSocket disconnected");
}

/// Synchronous so the thread-local RNG never lives across an await.
fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
    match msg {
        ClientWsMessage::Ping => ServerWsMessage::Pong,

        ClientWsMessage::NewWorksheet(req) => match build_worksheet(state, &req, &mut rand::thread_rng()) {
            Ok(out) => ServerWsMessage::Worksheet(out),
            Err(e) => ServerWsMessage::Error { message: e.to_string() },
        },

        ClientWsMessage::Evaluate(req) => ServerWsMessage::Evaluation(score_worksheet(state, &req)),
    }
}
