//! Bearer token verification with `jsonwebtoken`.
//!
//! The identity provider signs session tokens with RS256; local development
//! may use an HS256 shared secret instead. Only the `sub` claim is read and it
//! becomes the caller's [`UserId`].

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{IdentityError, IdentityVerifier};
use crate::settings::JwtKey;

/// The claims read from a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// The verifier could not be built from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token verification key: {message}")]
pub struct IdentityConfigError {
    message: String,
}

/// [`IdentityVerifier`] checking signature, expiry and optional issuer and
/// audience.
#[derive(Clone)]
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    /// Build a verifier for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityConfigError`] when the RSA key is not valid PEM.
    pub fn new(
        key: &JwtKey,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Result<Self, IdentityConfigError> {
        let (key, algorithm) = match key {
            JwtKey::RsaPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|err| IdentityConfigError {
                    message: err.to_string(),
                })?,
                Algorithm::RS256,
            ),
            JwtKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };
        Ok(Self::with_key(key, algorithm, issuer, audience))
    }

    /// Build an HS256 verifier for `secret`.
    pub fn with_secret(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        Self::with_key(
            DecodingKey::from_secret(secret.as_bytes()),
            Algorithm::HS256,
            issuer,
            audience,
        )
    }

    fn with_key(
        key: DecodingKey,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        Self { key, validation }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|err| IdentityError::invalid_token(err.to_string()))?;
        UserId::new(data.claims.sub).map_err(|err| IdentityError::invalid_subject(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use rstest::{fixture, rstest};

    const SECRET: &str = "local-development-secret";

    fn far_future() -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).expect("after epoch") + 3_600
    }

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token encodes")
    }

    fn claims(sub: &str) -> TokenClaims {
        TokenClaims {
            sub: sub.to_owned(),
            exp: far_future(),
            iss: Some("https://id.trustyhire.test".to_owned()),
            aud: None,
        }
    }

    #[fixture]
    fn verifier() -> JwtIdentityVerifier {
        JwtIdentityVerifier::new(
            &JwtKey::Secret(SECRET.to_owned()),
            Some("https://id.trustyhire.test"),
            None,
        )
        .expect("secret keys always build")
    }

    #[rstest]
    #[tokio::test]
    async fn valid_tokens_yield_the_subject(verifier: JwtIdentityVerifier) {
        let token = sign(&claims("user_2abc"), SECRET);
        let user = verifier.verify(&token).await.expect("token accepted");
        assert_eq!(user.as_ref(), "user_2abc");
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_signatures_are_rejected(verifier: JwtIdentityVerifier) {
        let token = sign(&claims("user_2abc"), "someone-else");
        let err = verifier.verify(&token).await.expect_err("bad signature");
        assert!(matches!(err, IdentityError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn expired_tokens_are_rejected(verifier: JwtIdentityVerifier) {
        let mut expired = claims("user_2abc");
        expired.exp = 1_000;
        let err = verifier
            .verify(&sign(&expired, SECRET))
            .await
            .expect_err("expired");
        assert!(matches!(err, IdentityError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_issuer_is_rejected(verifier: JwtIdentityVerifier) {
        let mut foreign = claims("user_2abc");
        foreign.iss = Some("https://elsewhere.test".to_owned());
        let err = verifier
            .verify(&sign(&foreign, SECRET))
            .await
            .expect_err("issuer mismatch");
        assert!(matches!(err, IdentityError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn blank_subjects_are_rejected(verifier: JwtIdentityVerifier) {
        let err = verifier
            .verify(&sign(&claims("   "), SECRET))
            .await
            .expect_err("blank subject");
        assert!(matches!(err, IdentityError::InvalidSubject { .. }));
    }

    #[rstest]
    fn malformed_rsa_keys_fail_to_build() {
        let result = JwtIdentityVerifier::new(
            &JwtKey::RsaPem("not a pem".to_owned()),
            None,
            None,
        );
        assert!(result.is_err());
    }
}
