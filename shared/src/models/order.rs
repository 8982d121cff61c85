//! Order wire model

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// One menu item reference with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Menu item id ("menu_item:xyz")
    pub item: String,
    /// Requested quantity, at least 1
    pub quantity: u32,
}

/// Order record as exposed to clients
///
/// `public_id` is the short human-facing token ("orderId" on the wire);
/// `id` is the storage identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "orderId")]
    pub public_id: String,
    #[serde(rename = "studentId")]
    pub owner_id: String,
    pub items: Vec<LineItem>,
    pub status: OrderStatus,
    pub roll_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    pub hostel_tag: Option<String>,
    /// RFC 3339 creation time
    pub created_at: String,
}
