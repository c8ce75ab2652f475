//! WebSocket Session Hub
//!
//! Tracks live dashboard sessions and their outbound channels.
//! The hub never sees a session's selection; that stays with the
//! connection task that owns it.

use std::collections::HashMap;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;
use crate::binder::{ChartUpdate, RenderSink};

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// Registry of connected sessions
pub struct SessionHub {
    /// Active sessions: SessionId → SessionHandle
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    /// Configuration
    config: HubConfig,
}

/// Configuration for the session hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent sessions
    pub max_sessions: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { max_sessions: 1000 }
    }
}

/// Handle for sending messages to a specific session
pub struct SessionHandle {
    /// Channel sender for this session
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    /// When the session connected
    pub connected_at: Instant,
}

impl RenderSink for mpsc::UnboundedSender<ServerMessage> {
    fn push(&mut self, update: ChartUpdate) {
        // A closed channel means the socket is already going away
        let _ = self.send(ServerMessage::from(update));
    }
}

impl SessionHub {
    /// Create a new session hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new session
    ///
    /// Returns the session ID on success, or an error if the session limit
    /// has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<SessionId, HubError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(HubError::TooManySessions(self.config.max_sessions));
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            SessionHandle {
                sender,
                connected_at: Instant::now(),
            },
        );

        tracing::info!(session_id = %id, "Dashboard session opened");
        Ok(id)
    }

    /// Unregister a session
    pub async fn unregister(&self, id: &str) {
        if let Some(handle) = self.sessions.write().await.remove(id) {
            tracing::info!(
                session_id = %id,
                duration_secs = handle.connected_at.elapsed().as_secs(),
                "Dashboard session closed"
            );
        }
    }

    /// Send a message directly to a specific session
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(id).ok_or(HubError::SessionNotFound)?;

        handle
            .sender
            .send(message)
            .map_err(|_| HubError::SendFailed)
    }

    /// Get the current session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn max_sessions(&self) -> usize {
        self.config.max_sessions
    }
}

/// Errors that can occur in the session hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many sessions (limit: {0})")]
    TooManySessions(usize),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::ChartId;
    use crate::chart::render_payload_chart;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_sessions, 1000);
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = SessionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.session_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let hub = SessionHub::new(HubConfig { max_sessions: 1 });
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        hub.register(tx1).await.unwrap();
        let err = hub.register(tx2).await.unwrap_err();
        assert!(matches!(err, HubError::TooManySessions(1)));
        assert_eq!(err.to_string(), "Too many sessions (limit: 1)");
    }

    #[tokio::test]
    async fn test_send_to() {
        let hub = SessionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        hub.send_to(&id, ServerMessage::Pong).await.unwrap();
        assert!(matches!(rx.recv().await, Some(ServerMessage::Pong)));

        let err = hub.send_to("missing", ServerMessage::Pong).await.unwrap_err();
        assert!(matches!(err, HubError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_channel_render_sink() {
        let (mut tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

        RenderSink::push(
            &mut tx,
            ChartUpdate {
                chart: ChartId::SuccessPayloadScatterChart,
                figure: render_payload_chart(&[]),
            },
        );

        match rx.recv().await {
            Some(ServerMessage::Figure { chart, .. }) => {
                assert_eq!(chart, ChartId::SuccessPayloadScatterChart)
            }
            other => panic!("Expected figure, got {:?}", other),
        }
    }
}
