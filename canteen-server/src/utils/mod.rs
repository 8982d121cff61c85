//! Utility module: common types and helpers
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{ok, AppError};
pub use result::AppResult;

/// API response envelope
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": false, "error": "Order not found" }
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Create a success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
