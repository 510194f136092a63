//! In-memory `UserRepository` implementation.

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserDetailsProjection, Username};

use super::store::{InMemoryStore, StoreFailure};

/// User half of the in-memory gateway.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    /// Create a repository over `store`.
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn map_store_failure(failure: StoreFailure) -> UserRepositoryError {
    match failure {
        StoreFailure::Offline => UserRepositoryError::connection("store offline"),
        StoreFailure::Poisoned => UserRepositoryError::query("store lock poisoned"),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.store
            .read(|state| state.user_by_name(username).map(|record| record.user.clone()))
            .map_err(map_store_failure)
    }

    async fn search_user_and_roles_by_username(
        &self,
        username: &Username,
    ) -> Result<Vec<UserDetailsProjection>, UserRepositoryError> {
        self.store
            .read(|state| state.projection_rows(username))
            .map_err(map_store_failure)
    }
}
