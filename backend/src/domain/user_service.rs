//! Caller resolution domain service.
//!
//! Turns the authentication subsystem's principal name into a domain
//! [`User`], and folds role projection rows into the [`UserIdentity`] the
//! authentication subsystem consumes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AuthenticationResolver, UserRepository, UserRepositoryError, UserResolution,
};
use crate::domain::{Error, User, UserIdentity, Username, fold_identity};

/// User service implementing the [`UserResolution`] driving port.
#[derive(Clone)]
pub struct UserService<U, A> {
    users: Arc<U>,
    resolver: Arc<A>,
}

impl<U, A> UserService<U, A> {
    /// Create a service over `users`, identifying callers with `resolver`.
    pub fn new(users: Arc<U>, resolver: Arc<A>) -> Self {
        Self { users, resolver }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn invalid_user() -> Error {
    Error::username_not_found("invalid user")
}

#[async_trait]
impl<U, A> UserResolution for UserService<U, A>
where
    U: UserRepository,
    A: AuthenticationResolver,
{
    async fn authenticated(&self) -> Result<User, Error> {
        let raw = self.resolver.logged_username().map_err(|err| {
            warn!(error = %err, "caller identity unavailable");
            invalid_user()
        })?;
        let username = Username::new(&raw).map_err(|err| {
            warn!(error = %err, "caller identity is not a valid username");
            invalid_user()
        })?;

        debug!(%username, "resolving caller");
        match self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_repository_error)?
        {
            Some(user) => Ok(user),
            None => {
                warn!(%username, "caller has no user record");
                Err(invalid_user())
            }
        }
    }

    async fn load_user_by_username(&self, username: &str) -> Result<UserIdentity, Error> {
        let username = Username::new(username).map_err(|_| invalid_user())?;
        let rows = self
            .users
            .search_user_and_roles_by_username(&username)
            .await
            .map_err(map_repository_error)?;
        debug!(%username, roles = rows.len(), "loaded identity rows");

        fold_identity(rows)
            .map_err(|err| Error::internal(format!("malformed identity rows: {err}")))?
            .ok_or_else(|| {
                warn!(%username, "no identity for username");
                Error::username_not_found(format!("username {username} not found"))
            })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
