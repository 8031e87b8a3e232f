//! Port abstraction for user profile persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// A profile already exists for this identity.
        AlreadyExists => "a profile already exists for this user",
        /// Another profile already uses the email address.
        EmailTaken => "email address is already in use",
        /// The profile to update does not exist.
        Missing => "profile does not exist",
        /// Store unreachable, pool exhausted or query timed out.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Driven port for user profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a profile by identity.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError>;

    /// Fetch every profile in `ids` that exists, in no particular order.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, UserRepositoryError>;

    /// Store a new profile.
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError>;

    /// Replace an existing profile.
    async fn update(&self, profile: &UserProfile) -> Result<(), UserRepositoryError>;
}
