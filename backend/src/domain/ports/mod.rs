//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AuthenticationResolver`]) are implemented by
//! outbound adapters. Driving ports ([`MovieCatalogue`], [`ScoreCommand`],
//! [`UserResolution`]) are implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod authentication_resolver;
mod movie_catalogue;
mod movie_repository;
mod score_command;
mod score_repository;
mod user_repository;
mod user_resolution;

#[cfg(test)]
pub use authentication_resolver::MockAuthenticationResolver;
pub use authentication_resolver::{
    AuthenticationError, AuthenticationResolver, FixtureAuthenticationResolver,
};
pub use movie_catalogue::MovieCatalogue;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
pub use movie_repository::{MovieRepository, MovieRepositoryError};
pub use score_command::{ScoreCommand, ScoreInput};
#[cfg(test)]
pub use score_repository::MockScoreRepository;
pub use score_repository::{ScoreRepository, ScoreRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_resolution::MockUserResolution;
pub use user_resolution::UserResolution;
