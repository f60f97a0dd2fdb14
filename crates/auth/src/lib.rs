//! `stockroom-auth` — session tokens for the inventory backend.
//!
//! Claims model and validation, HS256 issue/verify for the server, and the
//! explicit `Session` context clients pass to their HTTP store. No HTTP here.

pub mod claims;
pub mod jwt;
pub mod session;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator, decode_unverified};
pub use session::Session;
