//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the movie, score, and user types and the services that
//! operate on them through the ports in [`ports`]. Nothing here knows how
//! movies are stored or how callers authenticate.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Movie, MovieView, Score, User, UserIdentity: domain values.
//! - recompute_aggregate: pure mean-and-count over a score set.
//! - MovieService, UserService, ScoreService: driving port implementations.

pub mod error;
pub mod movie;
mod movie_service;
pub mod ports;
pub mod score;
mod score_service;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::movie::{
    EARLIEST_YEAR, Movie, MovieDetails, MovieId, MovieInput, MovieValidationError, MovieView,
};
pub use self::movie_service::{MovieService, PageLimits};
pub use self::score::{
    SCORE_MAX, SCORE_MIN, Score, ScoreSummary, ScoreValidationError, ScoreValue,
    recompute_aggregate,
};
pub use self::score_service::ScoreService;
pub use self::trace_id::TraceId;
pub use self::user::{
    PasswordHash, Role, User, UserDetailsProjection, UserId, UserIdentity, UserValidationError,
    Username, fold_identity,
};
pub use self::user_service::UserService;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use movie_ratings::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("movie 9 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
