//! Authentication module
//!
//! Validate-only trust boundary: tokens are issued by an external identity
//! service, this server only checks them and extracts identity + role.
//!
//! - [`JwtService`] - token validation (and issuance for tooling/tests)
//! - [`CurrentUser`] - authenticated caller context, axum extractor
//! - [`Role`] - closed student/staff role set

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
