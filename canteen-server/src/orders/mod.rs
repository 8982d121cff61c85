//! Order workflow core
//!
//! - [`lifecycle`] - legal status transitions and the notice each produces
//! - [`allocator`] - collision-checked public order tokens
//! - [`service`] - orchestration: placement and transition requests
//! - [`retention`] - background sweep of expired orders
//!
//! # Request flow
//!
//! ```text
//! place_order(owner, items, attrs)
//!     ├─ 1. Validate line items
//!     ├─ 2. Recompute hostel tag from canonical owner attributes
//!     ├─ 3. Allocate public id (checked against the store)
//!     ├─ 4. Persist
//!     └─ 5. Dispatch `newOrder` broadcast
//!
//! transition(role, order_ref, target)
//!     ├─ 1. Require staff role
//!     ├─ 2. Resolve order (record id, then public token)
//!     ├─ 3. Check the lifecycle edge
//!     ├─ 4. Persist status (single-document update)
//!     └─ 5. Dispatch targeted `orderStatusUpdated` / `orderRejected`
//! ```

pub mod allocator;
pub mod error;
pub mod lifecycle;
pub mod retention;
pub mod service;

pub use allocator::IdAllocator;
pub use error::OrderError;
pub use retention::RetentionSweeper;
pub use service::{OrderService, PlacementRequest};

#[cfg(test)]
mod tests;
