//! Port for committing scores.
//!
//! A score write and the recomputed aggregate of its movie form one logical
//! transaction. [`ScoreRepository::save_and_flush`] is that transaction: the
//! adapter upserts the score, recomputes the aggregate over the committed
//! score set, and makes both visible together.

use async_trait::async_trait;

use crate::domain::{Movie, MovieId, Score, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by score repository adapters.
    pub enum ScoreRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "score repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "score repository query failed: {message}",
        /// The scored movie vanished before the commit.
        MovieNotFound { id: MovieId } =>
            "movie {id} does not exist",
        /// The scoring user is unknown to the store.
        UserNotFound { id: UserId } =>
            "user {id} does not exist",
    }
}

/// Port for immediate-commit score persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Upsert `score` by `(user, movie)` and commit the recomputed aggregate.
    ///
    /// Returns the movie as committed, including every score stored for it.
    /// Concurrent calls for the same movie must not lose updates.
    async fn save_and_flush(&self, score: &Score) -> Result<Movie, ScoreRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_rows_name_their_ids() {
        let movie = MovieId::new(5).expect("valid movie id");
        let user = UserId::new(2).expect("valid user id");

        assert_eq!(
            ScoreRepositoryError::movie_not_found(movie).to_string(),
            "movie 5 does not exist"
        );
        assert_eq!(
            ScoreRepositoryError::user_not_found(user).to_string(),
            "user 2 does not exist"
        );
    }
}
