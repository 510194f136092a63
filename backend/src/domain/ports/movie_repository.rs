//! Port for movie persistence.
//!
//! The [`MovieRepository`] trait is the catalogue half of the persistence
//! gateway. Adapters own id assignment, title search, and the referential
//! integrity check that stops a scored movie from being deleted.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Movie, MovieDetails, MovieId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "movie repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "movie repository query failed: {message}",
        /// A reference fetch or write addressed a movie that does not exist.
        EntityNotFound { id: MovieId } =>
            "movie {id} does not exist",
        /// The store refused the change because other records depend on it.
        IntegrityViolation { message: String } =>
            "integrity violation: {message}",
    }
}

/// Port for movie storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Fetch a movie with its scores, or `None` when absent.
    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieRepositoryError>;

    /// Whether a movie with this id exists.
    async fn exists_by_id(&self, id: MovieId) -> Result<bool, MovieRepositoryError>;

    /// Fetch a movie that is about to be modified.
    ///
    /// Fails with [`MovieRepositoryError::EntityNotFound`] when the id is
    /// unknown, so callers never write through a dangling reference.
    async fn get_reference_by_id(&self, id: MovieId) -> Result<Movie, MovieRepositoryError>;

    /// Persist a new movie with no scores and return it with its assigned id.
    async fn insert(&self, details: &MovieDetails) -> Result<Movie, MovieRepositoryError>;

    /// Persist the editable details of an existing movie.
    ///
    /// Scores are owned by the score half of the gateway and are left as
    /// stored. Returns the movie as committed.
    async fn save(&self, movie: &Movie) -> Result<Movie, MovieRepositoryError>;

    /// Remove a movie.
    ///
    /// Fails with [`MovieRepositoryError::IntegrityViolation`] while scores
    /// still reference it.
    async fn delete_by_id(&self, id: MovieId) -> Result<(), MovieRepositoryError>;

    /// Movies whose title contains `title`, ignoring case, ordered by id.
    ///
    /// An empty `title` matches every movie.
    async fn search_by_title(
        &self,
        title: &str,
        request: PageRequest,
    ) -> Result<Page<Movie>, MovieRepositoryError>;
}
