//! Realtime frame protocol
//!
//! Frames travel between the server and connected client sessions as
//! `[type: u8][len: u32 LE][payload: len bytes of JSON]`. This module owns
//! the frame types and payload structs; the stream codec lives server-side.
//!
//! Event vocabulary:
//!
//! | frame | direction | payload |
//! |-------|-----------|---------|
//! | `identify` | client -> server | `{userId}` |
//! | `newOrder` | broadcast | full order record |
//! | `orderStatusUpdated` | targeted (owner) | `{orderId, status}` |
//! | `orderRejected` | targeted (owner) | `{orderId, message}` |
//! | `menuUpdated` | broadcast | none |
//! | `itemAvailabilityChanged` | broadcast | `{itemId, available}` |
//! | `itemRemoved` | broadcast | `{itemId}` |

use crate::models::Order;
use crate::order::OrderStatus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Realtime frame type (wire tag byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// Session announces which user it belongs to
    Identify = 0,
    /// A new order was placed
    NewOrder = 1,
    /// An order moved to a new status
    OrderStatusUpdated = 2,
    /// An order was rejected
    OrderRejected = 3,
    /// Menu contents changed; clients refetch
    MenuUpdated = 4,
    /// A single item was toggled (un)available
    ItemAvailabilityChanged = 5,
    /// A menu item was removed
    ItemRemoved = 6,
}

impl TryFrom<u8> for FrameType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FrameType::Identify),
            1 => Ok(FrameType::NewOrder),
            2 => Ok(FrameType::OrderStatusUpdated),
            3 => Ok(FrameType::OrderRejected),
            4 => Ok(FrameType::MenuUpdated),
            5 => Ok(FrameType::ItemAvailabilityChanged),
            6 => Ok(FrameType::ItemRemoved),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Identify => write!(f, "identify"),
            FrameType::NewOrder => write!(f, "newOrder"),
            FrameType::OrderStatusUpdated => write!(f, "orderStatusUpdated"),
            FrameType::OrderRejected => write!(f, "orderRejected"),
            FrameType::MenuUpdated => write!(f, "menuUpdated"),
            FrameType::ItemAvailabilityChanged => write!(f, "itemAvailabilityChanged"),
            FrameType::ItemRemoved => write!(f, "itemRemoved"),
        }
    }
}

// ==================== Payloads ====================

/// Identify payload (client -> server)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyPayload {
    pub user_id: String,
}

/// Status update payload (targeted at the order's owner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdatedPayload {
    /// Public order token
    pub order_id: String,
    pub status: OrderStatus,
}

/// Rejection payload (targeted at the order's owner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedPayload {
    /// Public order token
    pub order_id: String,
    pub message: String,
}

/// Availability toggle payload (broadcast)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAvailabilityPayload {
    pub item_id: String,
    pub available: bool,
}

/// Item removal payload (broadcast)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRemovedPayload {
    pub item_id: String,
}

// ==================== Frame ====================

/// One realtime frame: tag byte plus JSON payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub frame_type: FrameType,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(frame_type: FrameType, payload: Vec<u8>) -> Self {
        Self {
            frame_type,
            payload,
        }
    }

    fn with_json<T: Serialize>(frame_type: FrameType, payload: &T) -> Self {
        let bytes = serde_json::to_vec(payload).expect("Failed to serialize frame payload");
        Self::new(frame_type, bytes)
    }

    pub fn identify(payload: &IdentifyPayload) -> Self {
        Self::with_json(FrameType::Identify, payload)
    }

    pub fn new_order(order: &Order) -> Self {
        Self::with_json(FrameType::NewOrder, order)
    }

    pub fn status_updated(payload: &StatusUpdatedPayload) -> Self {
        Self::with_json(FrameType::OrderStatusUpdated, payload)
    }

    pub fn rejected(payload: &RejectedPayload) -> Self {
        Self::with_json(FrameType::OrderRejected, payload)
    }

    pub fn menu_updated() -> Self {
        Self::new(FrameType::MenuUpdated, Vec::new())
    }

    pub fn item_availability(payload: &ItemAvailabilityPayload) -> Self {
        Self::with_json(FrameType::ItemAvailabilityChanged, payload)
    }

    pub fn item_removed(payload: &ItemRemovedPayload) -> Self {
        Self::with_json(FrameType::ItemRemoved, payload)
    }

    /// Deserialize the JSON payload into the expected type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
