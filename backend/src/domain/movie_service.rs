//! Movie catalogue domain service.
//!
//! Implements [`MovieCatalogue`] over a [`MovieRepository`], translating
//! missing movies and integrity rejections into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{MovieCatalogue, MovieRepository, MovieRepositoryError};
use crate::domain::{Error, MovieDetails, MovieId, MovieInput, MovieView};

/// Page sizes applied to catalogue searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Size used when the caller does not ask for a page.
    pub default_size: u32,
    /// Largest size a caller may ask for.
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 12,
            max_size: 100,
        }
    }
}

impl PageLimits {
    /// Resolve the request a search should run with.
    pub fn resolve(&self, request: Option<PageRequest>) -> PageRequest {
        request
            .unwrap_or_else(|| PageRequest::first(self.default_size))
            .clamp_size(self.max_size)
    }
}

/// Catalogue service implementing the [`MovieCatalogue`] driving port.
#[derive(Clone)]
pub struct MovieService<M> {
    movies: Arc<M>,
    limits: PageLimits,
}

impl<M> MovieService<M> {
    /// Create a service over `movies` with default page limits.
    pub fn new(movies: Arc<M>) -> Self {
        Self {
            movies,
            limits: PageLimits::default(),
        }
    }

    /// Replace the page limits.
    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }
}

fn not_found(id: MovieId) -> Error {
    Error::not_found(format!("movie {id} not found")).with_details(json!({ "movieId": id }))
}

fn map_repository_error(error: MovieRepositoryError) -> Error {
    match error {
        MovieRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("movie repository unavailable: {message}"))
        }
        MovieRepositoryError::Query { message } => {
            Error::internal(format!("movie repository error: {message}"))
        }
        MovieRepositoryError::EntityNotFound { id } => not_found(id),
        MovieRepositoryError::IntegrityViolation { message } => {
            Error::conflict("integrity violation").with_details(json!({ "reason": message }))
        }
    }
}

fn validate(input: MovieInput) -> Result<MovieDetails, Error> {
    MovieDetails::try_from(input).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl<M> MovieCatalogue for MovieService<M>
where
    M: MovieRepository,
{
    async fn find_all(
        &self,
        title: &str,
        request: Option<PageRequest>,
    ) -> Result<Page<MovieView>, Error> {
        let request = self.limits.resolve(request);
        let title = title.trim();
        debug!(title, page = request.page(), size = request.size(), "searching movies");

        let page = self
            .movies
            .search_by_title(title, request)
            .await
            .map_err(map_repository_error)?;
        Ok(page.map(MovieView::from))
    }

    async fn find_by_id(&self, id: MovieId) -> Result<MovieView, Error> {
        debug!(%id, "fetching movie");
        self.movies
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .map(MovieView::from)
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, input: MovieInput) -> Result<MovieView, Error> {
        let details = validate(input)?;
        let movie = self
            .movies
            .insert(&details)
            .await
            .map_err(map_repository_error)?;
        info!(id = %movie.id(), title = details.title(), "movie created");
        Ok(movie.view())
    }

    async fn update(&self, id: MovieId, input: MovieInput) -> Result<MovieView, Error> {
        let mut movie = self
            .movies
            .get_reference_by_id(id)
            .await
            .map_err(map_repository_error)?;
        movie.apply_details(validate(input)?);

        let saved = self
            .movies
            .save(&movie)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "movie updated");
        Ok(saved.view())
    }

    async fn delete(&self, id: MovieId) -> Result<(), Error> {
        let exists = self
            .movies
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !exists {
            return Err(not_found(id));
        }

        match self.movies.delete_by_id(id).await {
            Ok(()) => {
                info!(%id, "movie deleted");
                Ok(())
            }
            Err(err @ MovieRepositoryError::IntegrityViolation { .. }) => {
                warn!(%id, error = %err, "movie deletion rejected");
                Err(map_repository_error(err))
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }
}

#[cfg(test)]
#[path = "movie_service_tests.rs"]
mod tests;
