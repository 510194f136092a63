//! Port abstraction for user lookups and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserDetailsProjection, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read-only access to users and their roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user with their roles by login identity.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// One row per role held by `username`, ordered by role id.
    ///
    /// Returns no rows for an unknown username.
    async fn search_user_and_roles_by_username(
        &self,
        username: &Username,
    ) -> Result<Vec<UserDetailsProjection>, UserRepositoryError>;
}
