//! Realtime TCP server
//!
//! Accept loop for framed-TCP client sessions:
//! 1. Accepts connections and registers a [`TcpSession`] with the hub
//! 2. Reads inbound frames; an `identify` frame binds the session to a user
//! 3. Unregisters the session on read error or disconnect
//! 4. Gracefully shuts down on the hub's cancellation signal

use shared::realtime::{Frame, FrameType, IdentifyPayload};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::hub::RealtimeHub;
use super::session::TcpSession;
use super::read_frame;
use crate::utils::AppError;

/// Run the accept loop until the hub is shut down.
pub async fn serve(hub: Arc<RealtimeHub>, listen_addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind: {}", e)))?;

    tracing::info!("Realtime TCP server listening on {}", listen_addr);

    let shutdown_token = hub.shutdown_token().clone();

    loop {
        tokio::select! {
            // Listen for shutdown signal
            _ = shutdown_token.cancelled() => {
                tracing::info!("Realtime TCP server shutting down");
                break;
            }

            // Accept new connections
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        tracing::info!("Client connected: {}", addr);
                        let hub = hub.clone();
                        let shutdown = shutdown_token.clone();
                        tokio::spawn(async move {
                            handle_connection(hub, stream, addr, shutdown).await;
                        });
                    }
                    Err(e) => {
                        tracing::error!("Failed to accept connection: {}", e);
                    }
                }
            }
        }
    }

    Ok(())
}

async fn handle_connection(
    hub: Arc<RealtimeHub>,
    stream: TcpStream,
    addr: SocketAddr,
    shutdown: CancellationToken,
) {
    let (mut reader, writer) = stream.into_split();
    let session_id = Uuid::new_v4().to_string();
    let session = Arc::new(TcpSession::new(session_id.clone(), writer));
    hub.connect(session);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Client {} handler shutting down", addr);
                break;
            }

            read_result = read_frame(&mut reader) => {
                match read_result {
                    Ok(frame) => handle_inbound_frame(&hub, &session_id, addr, frame),
                    Err(e) => {
                        tracing::info!("Client {} disconnected: {}", addr, e);
                        break;
                    }
                }
            }
        }
    }

    hub.disconnect(&session_id);
}

fn handle_inbound_frame(hub: &RealtimeHub, session_id: &str, addr: SocketAddr, frame: Frame) {
    match frame.frame_type {
        FrameType::Identify => match frame.decode::<IdentifyPayload>() {
            Ok(payload) => hub.identify(payload.user_id, session_id),
            Err(e) => {
                tracing::warn!("Client {} sent malformed identify payload: {}", addr, e);
            }
        },
        other => {
            // Clients only ever send identify; everything else is noise.
            tracing::debug!("Client {} sent unexpected frame {}, ignoring", addr, other);
        }
    }
}
