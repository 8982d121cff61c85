//! Wire models
//!
//! Records as serialized to clients (camelCase field names). The server
//! keeps separate storage models and converts at the API boundary.

pub mod menu_item;
pub mod order;
pub mod student;

pub use menu_item::MenuItem;
pub use order::{LineItem, Order};
pub use student::Student;
