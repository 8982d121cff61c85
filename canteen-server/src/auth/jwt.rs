//! JWT token service
//!
//! HS256 validation of externally issued tokens. Token generation is kept
//! for operational tooling and tests; the server itself never issues
//! tokens to clients.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::AppError;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret (must match the identity service)
    pub secret: String,
    /// Token lifetime in minutes (used when issuing)
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            "canteen-dev-secret-do-not-use-in-production".to_string()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
        }
    }
}

/// Caller role, as asserted by the external identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Staff)
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            _ => Err(()),
        }
    }
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role: "student" | "staff"
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
}

/// JWT errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// JWT token service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            config,
        }
    }

    /// Generate a token for the given identity (tooling/tests)
    pub fn generate_token(&self, user_id: &str, name: &str, role: Role) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the bearer token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}

/// Authenticated caller context
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Reject callers that are not staff.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::forbidden("Staff role required"))
        }
    }

    /// Reject callers that are not students.
    pub fn require_student(&self) -> Result<(), AppError> {
        if self.role.is_student() {
            Ok(())
        } else {
            Err(AppError::forbidden("Student role required"))
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| format!("unknown role: {}", claims.role))?;
        Ok(Self {
            id: claims.sub,
            name: claims.name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_minutes: 5,
        })
    }

    #[test]
    fn round_trip_claims() {
        let svc = service();
        let token = svc.generate_token("student:u1", "alice", Role::Student).unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "student:u1");
        assert_eq!(claims.role, "student");

        let user = CurrentUser::try_from(claims).unwrap();
        assert!(user.role.is_student());
        assert!(user.require_student().is_ok());
        assert!(user.require_staff().is_err());
    }

    #[test]
    fn rejects_token_from_other_secret() {
        let svc = service();
        let other = JwtService::new(JwtConfig {
            secret: "another-secret".to_string(),
            expiration_minutes: 5,
        });
        let token = other.generate_token("staff:s1", "bob", Role::Staff).unwrap();
        assert!(matches!(
            svc.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let claims = Claims {
            sub: "u1".to_string(),
            name: "x".to_string(),
            role: "superuser".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(CurrentUser::try_from(claims).is_err());
    }
}
