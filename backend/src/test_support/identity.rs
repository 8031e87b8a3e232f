//! HS256 tokens for exercising authenticated routes.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use crate::domain::UserId;
use crate::domain::ports::{IdentityError, IdentityVerifier};
use crate::outbound::identity::{JwtIdentityVerifier, TokenClaims};

/// Secret shared by [`mint_token`] and [`FixtureIdentity`].
pub const FIXTURE_SECRET: &str = "trustyhire-test-secret";

const TOKEN_LIFETIME_SECS: i64 = 3_600;

/// Sign a one-hour token for `subject` with [`FIXTURE_SECRET`].
///
/// # Errors
///
/// Returns the signing error from `jsonwebtoken`.
pub fn mint_token(subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() + TOKEN_LIFETIME_SECS;
    let claims = TokenClaims {
        sub: subject.to_owned(),
        exp: u64::try_from(exp).unwrap_or(u64::MAX),
        iss: None,
        aud: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(FIXTURE_SECRET.as_bytes()),
    )
}

/// Verifier accepting tokens from [`mint_token`].
#[derive(Clone)]
pub struct FixtureIdentity(JwtIdentityVerifier);

impl Default for FixtureIdentity {
    fn default() -> Self {
        Self(JwtIdentityVerifier::with_secret(FIXTURE_SECRET, None, None))
    }
}

#[async_trait]
impl IdentityVerifier for FixtureIdentity {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        self.0.verify(token).await
    }
}
