//! Port for verifying bearer tokens issued by the identity provider.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while verifying a bearer token.
    pub enum IdentityError {
        /// The token is malformed, expired or signed by someone else.
        InvalidToken { message: String } => "bearer token rejected: {message}",
        /// The token is valid but its subject is not a usable user id.
        InvalidSubject { message: String } => "token subject rejected: {message}",
    }
}

/// Driven port resolving a bearer token to the caller's identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the subject it was issued to.
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError>;
}
