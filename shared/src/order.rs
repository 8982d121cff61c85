//! Order status vocabulary
//!
//! The status set is closed. The legacy synonyms `waiting` (for `pending`)
//! and `ready` (for `prepared`) are accepted when parsing but never emitted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical explanation sent with a rejection notice.
pub const REJECTION_MESSAGE: &str = "Your order has been rejected due to submission of a fake or unclear payment screenshot. If this was not intentional or was submitted by mistake, please visit the night canteen and present the actual payment proof. Kindly ensure this is not repeated in the future.";

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting staff review. Initial state.
    #[serde(alias = "waiting")]
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Food is ready for pickup.
    #[serde(alias = "ready")]
    Prepared,
    /// Handed over. Terminal.
    Delivered,
    /// Declined by staff. Terminal.
    Rejected,
    /// Withdrawn. Terminal. Present in stored data; no API edge produces it.
    Cancelled,
}

impl OrderStatus {
    /// Returns `true` if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected | Self::Cancelled)
    }

    /// Canonical lowercase name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Prepared => "prepared",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name any known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    /// Case-insensitive parse with synonym normalization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "waiting" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "prepared" | "ready" => Ok(Self::Prepared),
            "delivered" => Ok(Self::Delivered),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}
