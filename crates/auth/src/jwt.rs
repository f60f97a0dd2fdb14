//! JWT encoding/decoding for session tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};

/// Server-side token verification.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenValidationError>;
}

/// HMAC-SHA256 validator/issuer sharing one secret.
pub struct Hs256JwtValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign claims into a compact token.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, TokenValidationError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected session token");
            map_jwt_error(e)
        })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// Read claims without verifying the signature.
///
/// Clients hold no secret; they only inspect the claims to decide whether a
/// stored token is still worth sending. The backend remains the authority.
pub fn decode_unverified(token: &str) -> Result<SessionClaims, TokenValidationError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    jsonwebtoken::decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenValidationError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenValidationError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenValidationError::Expired,
        _ => TokenValidationError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stockroom_core::EmployeeId;

    fn claims() -> SessionClaims {
        let now = Utc::now();
        SessionClaims::new(EmployeeId::new(3), "EMP-003", now, now + Duration::minutes(10))
    }

    #[test]
    fn issued_token_round_trips_through_validator() {
        let jwt = Hs256JwtValidator::new("test-secret");
        let token = jwt.issue(&claims()).unwrap();

        let decoded = jwt.validate(&token, Utc::now()).unwrap();
        assert_eq!(decoded.id, EmployeeId::new(3));
        assert_eq!(decoded.unique_employee_id, "EMP-003");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = Hs256JwtValidator::new("one").issue(&claims()).unwrap();
        let err = Hs256JwtValidator::new("two").validate(&token, Utc::now()).unwrap_err();
        assert_eq!(err, TokenValidationError::InvalidSignature);
    }

    #[test]
    fn expired_token_is_rejected_against_caller_clock() {
        let jwt = Hs256JwtValidator::new("test-secret");
        let token = jwt.issue(&claims()).unwrap();
        let err = jwt.validate(&token, Utc::now() + Duration::hours(1)).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }

    #[test]
    fn unverified_decode_reads_claims_without_secret() {
        let token = Hs256JwtValidator::new("server-only").issue(&claims()).unwrap();
        let decoded = decode_unverified(&token).unwrap();
        assert_eq!(decoded.unique_employee_id, "EMP-003");
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode_unverified("not-a-jwt"), Err(TokenValidationError::Malformed(_))));
    }
}
