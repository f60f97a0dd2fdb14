use chrono::{DateTime, Utc};

use stockroom_core::EmployeeId;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};
use crate::jwt::decode_unverified;

/// Authenticated session handed to whatever client talks to the backend.
///
/// Replaces a token kept in global browser storage: callers own the session and
/// pass it explicitly. Dropping it is logging out.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: SessionClaims,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("employee", &self.claims.unique_employee_id)
            .field("exp", &self.claims.exp)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Accept a token if its claims identify an employee and it has not expired.
    pub fn from_token(token: impl Into<String>, now: DateTime<Utc>) -> Result<Self, TokenValidationError> {
        let token = token.into();
        let claims = decode_unverified(token.trim())?;
        validate_claims(&claims, now)?;
        Ok(Self {
            token: token.trim().to_string(),
            claims,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.claims.id
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims.exp < now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Hs256JwtValidator;
    use chrono::Duration;

    fn token(expires_in: Duration) -> String {
        let now = Utc::now();
        let claims = SessionClaims::new(EmployeeId::new(11), "EMP-011", now, now + expires_in);
        Hs256JwtValidator::new("secret").issue(&claims).unwrap()
    }

    #[test]
    fn accepts_live_token() {
        let session = Session::from_token(token(Duration::minutes(5)), Utc::now()).unwrap();
        assert_eq!(session.employee_id(), EmployeeId::new(11));
        assert!(!session.is_expired(Utc::now()));
        assert!(session.is_expired(Utc::now() + Duration::minutes(10)));
    }

    #[test]
    fn rejects_expired_token() {
        let raw = token(Duration::minutes(5));
        let err = Session::from_token(raw, Utc::now() + Duration::hours(1)).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }

    #[test]
    fn debug_output_hides_the_token() {
        let raw = token(Duration::minutes(5));
        let session = Session::from_token(raw.clone(), Utc::now()).unwrap();
        assert!(!format!("{session:?}").contains(&raw));
    }
}
