//! Composition root wiring the domain services to the in-memory gateway.

use std::sync::Arc;

use crate::config::CatalogueSettings;
use crate::domain::ports::AuthenticationResolver;
use crate::domain::{MovieService, ScoreService, UserService};
use crate::outbound::memory::{
    InMemoryMovieRepository, InMemoryScoreRepository, InMemoryStore, InMemoryUserRepository,
};

/// Catalogue service over the in-memory gateway.
pub type InMemoryMovieService = MovieService<InMemoryMovieRepository>;
/// Caller resolution over the in-memory gateway.
pub type InMemoryUserService<A> = UserService<InMemoryUserRepository, A>;
/// Scoring over the in-memory gateway.
pub type InMemoryScoreService<A> =
    ScoreService<InMemoryMovieRepository, InMemoryScoreRepository, InMemoryUserService<A>>;

/// Every driving port, sharing one store and one caller resolver.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use movie_ratings::config::CatalogueSettings;
/// use movie_ratings::domain::ports::FixtureAuthenticationResolver;
/// use movie_ratings::outbound::memory::InMemoryStore;
/// use movie_ratings::services::MovieRatingServices;
///
/// let settings = CatalogueSettings {
///     default_page_size: None,
///     max_page_size: None,
///     log_json: false,
///     log_filter: None,
/// };
/// let resolver = Arc::new(FixtureAuthenticationResolver::anonymous());
/// let services = MovieRatingServices::in_memory(&InMemoryStore::new(), resolver, &settings);
/// # let _ = services.catalogue();
/// ```
pub struct MovieRatingServices<A> {
    catalogue: InMemoryMovieService,
    users: Arc<InMemoryUserService<A>>,
    scores: InMemoryScoreService<A>,
}

impl<A> MovieRatingServices<A>
where
    A: AuthenticationResolver,
{
    /// Wire the services over `store`, identifying callers with `resolver`.
    pub fn in_memory(
        store: &InMemoryStore,
        resolver: Arc<A>,
        settings: &CatalogueSettings,
    ) -> Self {
        let movies = Arc::new(InMemoryMovieRepository::new(store.clone()));
        let score_store = Arc::new(InMemoryScoreRepository::new(store.clone()));
        let users = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new(store.clone())),
            resolver,
        ));

        Self {
            catalogue: MovieService::new(Arc::clone(&movies))
                .with_page_limits(settings.page_limits()),
            scores: ScoreService::new(movies, score_store, Arc::clone(&users)),
            users,
        }
    }

    /// Catalogue operations.
    pub fn catalogue(&self) -> &InMemoryMovieService {
        &self.catalogue
    }

    /// Caller and credential resolution.
    pub fn users(&self) -> &InMemoryUserService<A> {
        &self.users
    }

    /// Score submission.
    pub fn scores(&self) -> &InMemoryScoreService<A> {
        &self.scores
    }
}
