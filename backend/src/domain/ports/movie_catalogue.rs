//! Driving port for catalogue operations.
//!
//! Inbound adapters call [`MovieCatalogue`] to browse and edit movies without
//! touching persistence. Every operation answers with [`MovieView`]s.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, MovieId, MovieInput, MovieView};

/// Domain use-case port for the movie catalogue.
#[async_trait]
pub trait MovieCatalogue: Send + Sync {
    /// Movies whose title contains `title`, ignoring case.
    ///
    /// `None` requests the first page at the configured default size. Never
    /// fails because nothing matched; an empty page is returned instead.
    async fn find_all(
        &self,
        title: &str,
        request: Option<PageRequest>,
    ) -> Result<Page<MovieView>, Error>;

    /// A single movie.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the id is unknown.
    async fn find_by_id(&self, id: MovieId) -> Result<MovieView, Error>;

    /// Create a movie with no scores.
    async fn insert(&self, input: MovieInput) -> Result<MovieView, Error>;

    /// Overwrite a movie's editable details.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the id is unknown; nothing
    /// is written in that case.
    async fn update(&self, id: MovieId, input: MovieInput) -> Result<MovieView, Error>;

    /// Remove a movie.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::NotFound`] when the id is unknown.
    /// - [`crate::domain::ErrorCode::Conflict`] while scores reference it.
    async fn delete(&self, id: MovieId) -> Result<(), Error>;
}
