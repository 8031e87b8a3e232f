//! Identity provider adapters.

mod jwt;

pub use jwt::{IdentityConfigError, JwtIdentityVerifier, TokenClaims};
