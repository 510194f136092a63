//! Driving port for submitting scores.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, MovieId, MovieView};

/// Score submitted by the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    /// Movie being scored.
    pub movie_id: MovieId,
    /// Raw score value, validated by the service.
    pub score: f64,
}

/// Domain use-case port for scoring movies.
#[async_trait]
pub trait ScoreCommand: Send + Sync {
    /// Record the caller's score and return the movie with its new aggregate.
    ///
    /// Re-submitting replaces the caller's previous score for the movie.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] for values off the scale.
    /// - [`crate::domain::ErrorCode::UsernameNotFound`] when the caller cannot
    ///   be resolved.
    /// - [`crate::domain::ErrorCode::NotFound`] when the movie is unknown.
    async fn save_score(&self, input: ScoreInput) -> Result<MovieView, Error>;
}
