//! Driving port for resolving callers into users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserIdentity};

/// Domain use-case port for caller and credential lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserResolution: Send + Sync {
    /// The user behind the current call.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::UsernameNotFound`] when no caller is
    /// authenticated or the caller's username matches no user.
    async fn authenticated(&self) -> Result<User, Error>;

    /// Username, password hash, and roles for a credential check.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::UsernameNotFound`] when `username` matches
    /// no user.
    async fn load_user_by_username(&self, username: &str) -> Result<UserIdentity, Error>;
}
