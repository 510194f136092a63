//! Score aggregation domain service.
//!
//! Resolves the caller, checks the movie exists, validates the value, and
//! commits the caller's score through [`ScoreRepository::save_and_flush`],
//! which upserts it and recomputes the aggregate in one transaction. The
//! movie returned to the caller is the committed one, so concurrent scorers
//! always see an aggregate that covers every committed score.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    MovieRepository, MovieRepositoryError, ScoreCommand, ScoreInput, ScoreRepository,
    ScoreRepositoryError, UserResolution,
};
use crate::domain::{Error, MovieId, MovieView, Score, ScoreValue};

/// Score service implementing the [`ScoreCommand`] driving port.
#[derive(Clone)]
pub struct ScoreService<M, S, U> {
    movies: Arc<M>,
    scores: Arc<S>,
    users: Arc<U>,
}

impl<M, S, U> ScoreService<M, S, U> {
    /// Create a service over the catalogue, the score store, and the caller
    /// resolver.
    pub fn new(movies: Arc<M>, scores: Arc<S>, users: Arc<U>) -> Self {
        Self {
            movies,
            scores,
            users,
        }
    }
}

fn movie_not_found(id: MovieId) -> Error {
    Error::not_found(format!("movie {id} not found")).with_details(json!({ "movieId": id }))
}

fn map_movie_error(error: MovieRepositoryError) -> Error {
    match error {
        MovieRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("movie repository unavailable: {message}"))
        }
        MovieRepositoryError::EntityNotFound { id } => movie_not_found(id),
        MovieRepositoryError::Query { message }
        | MovieRepositoryError::IntegrityViolation { message } => {
            Error::internal(format!("movie repository error: {message}"))
        }
    }
}

fn map_score_error(error: ScoreRepositoryError) -> Error {
    match error {
        ScoreRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("score repository unavailable: {message}"))
        }
        ScoreRepositoryError::Query { message } => {
            Error::internal(format!("score repository error: {message}"))
        }
        ScoreRepositoryError::MovieNotFound { id } => movie_not_found(id),
        ScoreRepositoryError::UserNotFound { .. } => Error::username_not_found("invalid user"),
    }
}

#[async_trait]
impl<M, S, U> ScoreCommand for ScoreService<M, S, U>
where
    M: MovieRepository,
    S: ScoreRepository,
    U: UserResolution,
{
    async fn save_score(&self, input: ScoreInput) -> Result<MovieView, Error> {
        let ScoreInput { movie_id, score } = input;
        let user = self.users.authenticated().await?;
        self.movies
            .find_by_id(movie_id)
            .await
            .map_err(map_movie_error)?
            .ok_or_else(|| movie_not_found(movie_id))?;

        let value = ScoreValue::new(score).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "score" }))
        })?;
        let score = Score::new(user.id(), movie_id, value);
        debug!(%movie_id, user_id = %user.id(), "committing score");

        let committed = self
            .scores
            .save_and_flush(&score)
            .await
            .map_err(map_score_error)?;
        let summary = committed.summary();
        info!(
            %movie_id,
            user_id = %user.id(),
            average = summary.average(),
            count = summary.count(),
            "score saved"
        );
        Ok(committed.view())
    }
}

#[cfg(test)]
#[path = "score_service_tests.rs"]
mod tests;
