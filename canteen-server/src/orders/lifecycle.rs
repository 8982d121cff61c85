//! Order lifecycle state machine
//!
//! # State diagram
//!
//! ```text
//!              ┌────────► Rejected (terminal)
//!              │              ▲
//!  Pending ────┤              │
//!              │              │
//!              └─► Confirmed ─┴─► Prepared ──► Delivered (terminal)
//! ```
//!
//! Rejection is reachable from `Pending` and `Confirmed` only; once food
//! is prepared the order can only be delivered. There are no self-loop
//! edges and nothing leaves a terminal state. `Cancelled` exists in the
//! status vocabulary but no edge produces it.
//!
//! Every legal transition determines the outbound notice: entering
//! `Rejected` produces a rejection notice carrying the canonical
//! explanation; every other edge produces a plain status-change notice.

use super::error::OrderError;
use shared::order::OrderStatus;

/// Kind of notice a successful transition emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    StatusChanged,
    Rejected,
}

/// Returns `true` if `from -> to` is a listed edge.
pub fn is_legal(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Rejected)
            | (Confirmed, Prepared)
            | (Confirmed, Rejected)
            | (Prepared, Delivered)
    )
}

/// Validate a requested transition.
///
/// Returns the notice kind the caller must emit after persisting, or
/// [`OrderError::InvalidTransition`] without any side effect.
pub fn apply(from: OrderStatus, to: OrderStatus) -> Result<NoticeKind, OrderError> {
    if !is_legal(from, to) {
        return Err(OrderError::InvalidTransition { from, to });
    }

    Ok(if to == OrderStatus::Rejected {
        NoticeKind::Rejected
    } else {
        NoticeKind::StatusChanged
    })
}
