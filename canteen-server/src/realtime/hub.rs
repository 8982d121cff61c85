//! Realtime hub
//!
//! Tracks every connected session (identified or not) and owns the
//! [`ConnectionRegistry`]. The TCP accept loop and in-process clients feed
//! connect/identify/disconnect events in; the dispatcher reads sessions
//! out for broadcast and the registry for targeted sends.

use dashmap::DashMap;
use shared::realtime::Frame;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::registry::ConnectionRegistry;
use super::session::SessionSink;

pub struct RealtimeHub {
    /// All connected sessions (session id -> sink)
    sessions: DashMap<String, Arc<dyn SessionSink>>,
    /// Identity -> session binding
    registry: ConnectionRegistry,
    /// Shutdown signal for the accept loop and workers
    shutdown_token: CancellationToken,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            registry: ConnectionRegistry::new(),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// A session connected (not yet identified)
    pub fn connect(&self, session: Arc<dyn SessionSink>) {
        let id = session.session_id().to_string();
        tracing::debug!(session = %id, "Session connected");
        self.sessions.insert(id, session);
    }

    /// A connected session announced which user it belongs to
    pub fn identify(&self, identity: impl Into<String>, session_id: &str) {
        let identity = identity.into();
        match self.sessions.get(session_id).map(|s| s.value().clone()) {
            Some(session) => {
                tracing::debug!(session = %session_id, user = %identity, "Session identified");
                self.registry.bind(identity, session);
            }
            None => {
                tracing::warn!(session = %session_id, "Identify from unknown session, ignoring");
            }
        }
    }

    /// A session disconnected; drop it and any identity binding it held
    pub fn disconnect(&self, session_id: &str) {
        tracing::debug!(session = %session_id, "Session disconnected");
        self.sessions.remove(session_id);
        self.registry.unbind(session_id);
    }

    /// Send a frame to every connected session, best-effort.
    pub async fn broadcast(&self, frame: &Frame) {
        // Snapshot first so no map guard is held across an await point.
        let targets: Vec<Arc<dyn SessionSink>> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for session in targets {
            if let Err(e) = session.send(frame).await {
                tracing::debug!(
                    session = %session.session_id(),
                    event = %frame.frame_type,
                    error = %e,
                    "Broadcast send failed, dropping"
                );
            }
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn connected_count(&self) -> usize {
        self.sessions.len()
    }

    /// Shutdown token for the TCP accept loop and background workers
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Signal every realtime task to stop
    pub fn shutdown(&self) {
        tracing::info!("Shutting down realtime hub");
        self.shutdown_token.cancel();
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}
