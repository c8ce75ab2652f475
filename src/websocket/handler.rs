//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::{HubError, SessionHub};
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::binder::{Dispatcher, Session};

/// WebSocket upgrade handler
///
/// This is the entry point for dashboard sessions.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let hub = Arc::clone(&state.hub);

    // Create channel for sending messages to this session
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let session_id = match hub.register(tx.clone()).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected dashboard session");
            if let Ok(text) = serde_json::to_string(&rejection(&e)) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let mut sink = tx;
    let mut session = open_session(&state, &session_id, &mut sink);

    let conn_id_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let dispatcher = Arc::clone(&state.dispatcher);

    // Task to receive control changes and recompute charts
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &dispatcher, &mut session, &mut sink, msg)
                        .await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session.id(),
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&session_id).await;
}

/// Start a session at the initial selection
///
/// Pushes `connected` and then one figure per registered chart.
fn open_session(
    state: &AppState,
    session_id: &str,
    sink: &mut mpsc::UnboundedSender<ServerMessage>,
) -> Session {
    // The session and its selection live only inside this connection
    let session = Session::new(session_id, Arc::clone(&state.dataset));

    let _ = sink.send(ServerMessage::Connected {
        session_id: session_id.to_string(),
        selection: session.selection().clone(),
    });
    session.render_all(&state.dispatcher, sink);
    session
}

/// Message sent to a connection the hub turned away
fn rejection(error: &HubError) -> ServerMessage {
    ServerMessage::Error {
        message: error.to_string(),
    }
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &SessionHub,
    dispatcher: &Dispatcher,
    session: &mut Session,
    sink: &mut mpsc::UnboundedSender<ServerMessage>,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(hub, dispatcher, session, sink, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session.id(),
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Send error but keep connection open
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = hub.send_to(session.id(), error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = hub.send_to(session.id(), error_msg).await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session.id(), "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(
    hub: &SessionHub,
    dispatcher: &Dispatcher,
    session: &mut Session,
    sink: &mut mpsc::UnboundedSender<ServerMessage>,
    message: ClientMessage,
) {
    match message.into_change() {
        Some(change) => {
            session.handle(change, dispatcher, sink);
        }
        None => {
            let _ = hub.send_to(session.id(), ServerMessage::Pong).await;
        }
    }
}
