//! Type conversion module
//!
//! Converts storage models (db::models) into API wire models
//! (shared::models): record ids become "table:key" strings, epoch
//! timestamps become RFC 3339.

use crate::db::models as db;
use chrono::DateTime;
use shared::models as api;
use surrealdb::RecordId;

// ============ Helpers ============

pub fn record_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(|r| r.to_string())
}

pub fn millis_to_rfc3339(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

// ============ Order ============

impl From<db::Order> for api::Order {
    fn from(o: db::Order) -> Self {
        Self {
            id: record_id_to_string(&o.id),
            public_id: o.public_id,
            owner_id: o.owner_id,
            items: o.line_items,
            status: o.status,
            roll_no: o.roll_no,
            payment_ref: o.payment_ref,
            hostel_tag: o.hostel_tag,
            created_at: millis_to_rfc3339(o.created_at),
        }
    }
}

// ============ Menu Item ============

impl From<db::MenuItem> for api::MenuItem {
    fn from(m: db::MenuItem) -> Self {
        Self {
            id: record_id_to_string(&m.id),
            name: m.name,
            price: m.price,
            category: m.category,
            image_url: m.image_url,
            available: m.available,
        }
    }
}

// ============ Student ============

impl From<db::Student> for api::Student {
    fn from(s: db::Student) -> Self {
        Self {
            id: record_id_to_string(&s.id),
            email: s.email,
            name: s.name,
        }
    }
}
