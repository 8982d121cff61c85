//! Order storage model

use serde::{Deserialize, Serialize};
use shared::models::LineItem;
use shared::order::OrderStatus;
use surrealdb::RecordId;

/// Order entity
///
/// `public_id` is the 4-character human-facing token; it is unique among
/// retained orders and immutable after creation. `status` is only mutated
/// through the lifecycle module. `created_at` is epoch milliseconds so the
/// retention sweep can range-delete on an indexed integer field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub public_id: String,
    pub owner_id: String,
    pub line_items: Vec<LineItem>,
    pub status: OrderStatus,
    pub roll_no: String,
    #[serde(default)]
    pub payment_ref: Option<String>,
    #[serde(default)]
    pub hostel_tag: Option<String>,
    /// Epoch milliseconds
    pub created_at: i64,
}
