//! Shared types for the canteen order server
//!
//! Types used by both the server and its realtime/HTTP clients:
//! order status vocabulary, wire models, and the realtime frame protocol.

pub mod models;
pub mod order;
pub mod realtime;

// Re-exports
pub use order::{OrderStatus, StatusParseError, REJECTION_MESSAGE};
pub use realtime::{Frame, FrameType};
