use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::EmployeeId;

/// Claims carried by an inventory session token.
///
/// The backend issues these; clients only read them to decide whether the
/// stored token is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Employee record id.
    pub id: EmployeeId,

    /// Human-facing employee code.
    pub unique_employee_id: String,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,

    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl SessionClaims {
    pub fn new(id: EmployeeId, unique_employee_id: impl Into<String>, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            unique_employee_id: unique_employee_id.into(),
            exp: expires_at.timestamp(),
            iat: Some(issued_at.timestamp()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token does not identify an employee")]
    MissingIdentity,

    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token signature is invalid")]
    InvalidSignature,
}

/// Deterministically validate session claims against `now`.
///
/// A token is still valid during its expiry second.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.id.get() == 0 || claims.unique_employee_id.trim().is_empty() {
        return Err(TokenValidationError::MissingIdentity);
    }
    if matches!(claims.iat, Some(iat) if claims.exp <= iat) {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if claims.exp < now.timestamp() {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
