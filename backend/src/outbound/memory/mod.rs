//! In-memory persistence gateway.
//!
//! Implements the movie, score, and user repository ports over one shared
//! [`InMemoryStore`]. The adapters honour the same contract a relational
//! store would: ids are assigned on insert, scored movies cannot be deleted,
//! and a score commit is atomic with the aggregate it produces.
//!
//! ```
//! use movie_ratings::outbound::memory::{InMemoryMovieRepository, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let movies = InMemoryMovieRepository::new(store.clone());
//! # let _ = movies;
//! ```

mod movie_repository;
mod score_repository;
mod store;
mod user_repository;

pub use movie_repository::InMemoryMovieRepository;
pub use score_repository::InMemoryScoreRepository;
pub use store::{InMemoryStore, SeedError};
pub use user_repository::InMemoryUserRepository;
