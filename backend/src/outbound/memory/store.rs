//! Shared in-memory tables behind the repository adapters.
//!
//! Every read and write takes the single state lock, so each adapter call is
//! one serialisable transaction. No lock is held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    Movie, MovieDetails, MovieId, MovieInput, MovieValidationError, Role, Score,
    ScoreValidationError, ScoreValue, User, UserDetailsProjection, UserId, UserValidationError,
    Username,
};

/// Why the store could not serve a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StoreFailure {
    /// The store was switched offline with [`InMemoryStore::set_offline`].
    Offline,
    /// A previous holder of the lock panicked.
    Poisoned,
}

/// Errors raised by the seeding helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    /// Movie fields failed validation.
    #[error("invalid movie: {0}")]
    Movie(#[from] MovieValidationError),
    /// User fields failed validation.
    #[error("invalid user: {0}")]
    User(#[from] UserValidationError),
    /// Score value failed validation.
    #[error("invalid score: {0}")]
    Score(#[from] ScoreValidationError),
    /// Another user already holds the username.
    #[error("username {0} is already taken")]
    DuplicateUsername(String),
    /// A score referenced a movie that is not stored.
    #[error("movie {0} does not exist")]
    UnknownMovie(MovieId),
    /// A score referenced a user that is not stored.
    #[error("user {0} does not exist")]
    UnknownUser(UserId),
    /// The store refused the write.
    #[error("store unavailable")]
    Unavailable,
}

impl From<StoreFailure> for SeedError {
    fn from(_: StoreFailure) -> Self {
        Self::Unavailable
    }
}

#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub(super) user: User,
    pub(super) password: String,
}

#[derive(Debug, Default)]
pub(super) struct StoreState {
    offline: bool,
    next_movie_id: i64,
    next_user_id: i64,
    pub(super) movies: BTreeMap<MovieId, MovieDetails>,
    pub(super) scores: BTreeMap<(MovieId, UserId), ScoreValue>,
    pub(super) users: BTreeMap<UserId, UserRecord>,
}

impl StoreState {
    /// Rebuild a movie together with every score stored for it.
    pub(super) fn movie(&self, id: MovieId) -> Option<Movie> {
        let details = self.movies.get(&id)?;
        let scores = self
            .scores
            .range((id, UserId::MIN)..=(id, UserId::MAX))
            .map(|(&(movie_id, user_id), &value)| Score::new(user_id, movie_id, value));
        Some(Movie::from_parts(id, details.clone(), scores))
    }

    pub(super) fn has_scores(&self, id: MovieId) -> bool {
        self.scores
            .range((id, UserId::MIN)..=(id, UserId::MAX))
            .next()
            .is_some()
    }

    pub(super) fn insert_movie(
        &mut self,
        details: MovieDetails,
    ) -> Result<Movie, MovieValidationError> {
        self.next_movie_id += 1;
        let id = MovieId::new(self.next_movie_id)?;
        self.movies.insert(id, details.clone());
        Ok(Movie::new(id, details))
    }

    pub(super) fn user_by_name(&self, username: &Username) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|record| record.user.username() == username)
    }

    pub(super) fn projection_rows(&self, username: &Username) -> Vec<UserDetailsProjection> {
        let Some(record) = self.user_by_name(username) else {
            return Vec::new();
        };
        let mut roles = record.user.roles().to_vec();
        roles.sort_by_key(Role::id);
        roles
            .into_iter()
            .map(|role| UserDetailsProjection {
                username: record.user.username().to_string(),
                password: record.password.clone(),
                role_id: role.id(),
                authority: role.authority().to_owned(),
            })
            .collect()
    }
}

/// In-memory store shared by the repository adapters.
///
/// Cloning is cheap and every clone sees the same tables.
///
/// # Examples
/// ```
/// use movie_ratings::domain::MovieInput;
/// use movie_ratings::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let movie = store.insert_movie(MovieInput::titled("Heat")).unwrap();
/// assert_eq!(movie.id().get(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreFailure> {
        self.state.lock().map_err(|_| StoreFailure::Poisoned)
    }

    /// Run `f` against a consistent snapshot of every table.
    pub(super) fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, StoreFailure> {
        let state = self.lock()?;
        if state.offline {
            return Err(StoreFailure::Offline);
        }
        Ok(f(&state))
    }

    /// Run `f` as a single transaction.
    pub(super) fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> Result<T, StoreFailure> {
        let mut state = self.lock()?;
        if state.offline {
            return Err(StoreFailure::Offline);
        }
        Ok(f(&mut state))
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub fn set_offline(&self, offline: bool) {
        match self.state.lock() {
            Ok(mut state) => state.offline = offline,
            Err(poisoned) => poisoned.into_inner().offline = offline,
        }
    }

    /// Seed a movie and return it with its assigned id.
    pub fn insert_movie(&self, input: MovieInput) -> Result<Movie, SeedError> {
        let details = MovieDetails::try_from(input)?;
        let movie = self.write(|state| state.insert_movie(details))??;
        debug!(id = %movie.id(), "seeded movie");
        Ok(movie)
    }

    /// Seed a user with a stored password hash and roles.
    pub fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<User, SeedError> {
        let username = Username::new(username)?;
        let roles: Vec<Role> = roles.into_iter().collect();
        let user = self.write(|state| -> Result<User, SeedError> {
            if state.user_by_name(&username).is_some() {
                return Err(SeedError::DuplicateUsername(username.to_string()));
            }
            state.next_user_id += 1;
            let user = User::new(UserId::new(state.next_user_id)?, username, roles);
            state.users.insert(
                user.id(),
                UserRecord {
                    user: user.clone(),
                    password: password_hash.to_owned(),
                },
            );
            Ok(user)
        })??;
        debug!(id = %user.id(), "seeded user");
        Ok(user)
    }

    /// Seed a score, replacing any earlier score by the same user.
    pub fn insert_score(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        value: f64,
    ) -> Result<(), SeedError> {
        let value = ScoreValue::new(value)?;
        self.write(|state| {
            if !state.movies.contains_key(&movie_id) {
                return Err(SeedError::UnknownMovie(movie_id));
            }
            if !state.users.contains_key(&user_id) {
                return Err(SeedError::UnknownUser(user_id));
            }
            state.scores.insert((movie_id, user_id), value);
            Ok(())
        })?
    }
}
