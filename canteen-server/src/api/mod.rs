//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`orders`] - order placement, listing and status transitions
//! - [`menu_items`] - menu management
//! - [`convert`] - storage model to wire model conversion

pub mod convert;

pub mod health;
pub mod menu_items;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
