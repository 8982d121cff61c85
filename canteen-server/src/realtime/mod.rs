//! Realtime notification layer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  NotificationDispatcher               │
//! │   created/menu events ──► broadcast to all sessions   │
//! │   statusChanged/rejected ──► registry lookup ──► one  │
//! └───────────────────────────┬──────────────────────────┘
//!                             │
//!                     ┌───────┴────────┐
//!                     │  RealtimeHub   │   sessions + registry
//!                     └───────┬────────┘
//!                             │
//!                  ┌──────────┴──────────┐
//!                  │  SessionSink trait  │  ◄── pluggable
//!                  └──────────┬──────────┘
//!                             │
//!                  ┌──────────┴──────────┐
//!                  ▼                     ▼
//!             TcpSession           MemorySession
//!             (framed TCP)         (in-process)
//! ```
//!
//! Delivery is best-effort and at-most-once per connected session: a send
//! to a stale handle is logged and dropped, never surfaced as an error.
//! State is the source of truth; clients that miss a push re-read.

pub mod dispatcher;
pub mod hub;
pub mod registry;
pub mod session;
pub mod tcp_server;

pub use dispatcher::{NotificationDispatcher, OrderNotice};
pub use hub::RealtimeHub;
pub use registry::ConnectionRegistry;
pub use session::{MemorySession, SessionSink, TcpSession};
pub use shared::realtime::{Frame, FrameType};

use crate::utils::AppError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

// ========== Stream codec ==========
//
// One frame on the wire: [type: u8][len: u32 LE][payload: len bytes].

pub(crate) async fn read_frame<R: AsyncReadExt + Unpin>(reader: &mut R) -> Result<Frame, AppError> {
    // Read frame type (1 byte)
    let mut type_buf = [0u8; 1];
    reader
        .read_exact(&mut type_buf)
        .await
        .map_err(|e| AppError::internal(format!("Read type failed: {}", e)))?;

    let frame_type =
        FrameType::try_from(type_buf[0]).map_err(|_| AppError::validation("Invalid frame type"))?;

    // Read payload length (4 bytes)
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| AppError::internal(format!("Read len failed: {}", e)))?;

    let len = u32::from_le_bytes(len_buf) as usize;

    // Read payload
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(|e| AppError::internal(format!("Read payload failed: {}", e)))?;

    Ok(Frame::new(frame_type, payload))
}

pub(crate) async fn write_frame<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    frame: &Frame,
) -> Result<(), AppError> {
    let mut data = Vec::with_capacity(5 + frame.payload.len());
    data.push(frame.frame_type as u8);
    data.extend_from_slice(&(frame.payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&frame.payload);

    writer
        .write_all(&data)
        .await
        .map_err(|e| AppError::internal(format!("Write failed: {}", e)))?;
    Ok(())
}
