//! Order workflow errors

use crate::db::repository::RepoError;
use crate::utils::AppError;
use shared::order::OrderStatus;
use thiserror::Error;

/// Errors surfaced by the order workflow.
///
/// `NotFound`, `InvalidTransition` and `Forbidden` are rejected operations
/// with no state change and are never retried. `Transient` means a
/// dependency was unreachable; the caller may retry the whole request.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Dependency unavailable: {0}")]
    Transient(String),
}

impl From<RepoError> for OrderError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => OrderError::NotFound(msg),
            RepoError::Duplicate(msg) => OrderError::Validation(msg),
            RepoError::Database(msg) => OrderError::Transient(msg),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(msg) => AppError::not_found(msg),
            OrderError::InvalidTransition { from, to } => {
                AppError::business_rule(format!("Illegal status transition: {from} -> {to}"))
            }
            OrderError::Forbidden(msg) => AppError::forbidden(msg),
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::Transient(msg) => AppError::unavailable(msg),
        }
    }
}
