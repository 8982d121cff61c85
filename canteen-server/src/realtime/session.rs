//! Session sinks
//!
//! A session is one connected client. The hub and registry only see the
//! [`SessionSink`] trait; the concrete transports are framed TCP for
//! network clients and an in-process channel for tests and local tooling.

use async_trait::async_trait;
use shared::realtime::Frame;
use std::sync::Arc;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;
use tokio::sync::mpsc;

use super::write_frame;
use crate::utils::AppError;

/// Server-side handle to one connected session.
///
/// Sends are best-effort: a returned error means the peer is gone or going;
/// callers log and move on.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Stable id of the underlying connection
    fn session_id(&self) -> &str;

    /// Push one frame to the peer
    async fn send(&self, frame: &Frame) -> Result<(), AppError>;
}

// ========== TCP Session ==========

/// Framed-TCP session (write half; the accept loop owns the read half)
pub struct TcpSession {
    id: String,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl TcpSession {
    pub fn new(id: String, writer: OwnedWriteHalf) -> Self {
        Self {
            id,
            writer: Arc::new(Mutex::new(writer)),
        }
    }
}

#[async_trait]
impl SessionSink for TcpSession {
    fn session_id(&self) -> &str {
        &self.id
    }

    async fn send(&self, frame: &Frame) -> Result<(), AppError> {
        let mut writer = self.writer.lock().await;
        write_frame(&mut *writer, frame).await
    }
}

// ========== Memory Session (In-Process) ==========

/// In-process session backed by an unbounded channel.
///
/// The receiving end observes exactly the frames this session was sent;
/// used by tests and same-process clients.
pub struct MemorySession {
    id: String,
    tx: mpsc::UnboundedSender<Frame>,
}

impl MemorySession {
    /// Create a session and the receiver observing its outbound frames.
    pub fn channel(id: impl Into<String>) -> (Arc<Self>, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                id: id.into(),
                tx,
            }),
            rx,
        )
    }
}

#[async_trait]
impl SessionSink for MemorySession {
    fn session_id(&self) -> &str {
        &self.id
    }

    async fn send(&self, frame: &Frame) -> Result<(), AppError> {
        self.tx
            .send(frame.clone())
            .map_err(|e| AppError::internal(format!("Session receiver dropped: {}", e)))
    }
}
