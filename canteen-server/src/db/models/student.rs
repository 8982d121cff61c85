//! Student storage model
//!
//! Minimal read model. The email is the canonical attribute the order
//! service revalidates hostel tags against; credentials live elsewhere.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub email: String,
    pub name: String,
}
