//! Storage models
//!
//! Records as persisted in SurrealDB. Ids are native [`surrealdb::RecordId`]
//! values; conversion to the string-id wire models happens in
//! `api::convert`.

pub mod menu_item;
pub mod order;
pub mod student;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::Order;
pub use student::Student;
