//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! one pulls this module in with `mod support;` and may use only part of it.
#![allow(dead_code)]

use std::sync::Arc;

use movie_ratings::config::CatalogueSettings;
use movie_ratings::domain::ports::FixtureAuthenticationResolver;
use movie_ratings::domain::{MovieId, MovieInput, Role, User};
use movie_ratings::outbound::memory::InMemoryStore;
use movie_ratings::services::MovieRatingServices;

/// Authority held by ordinary scorers.
pub const CLIENT: &str = "ROLE_CLIENT";
/// Authority held by catalogue editors.
pub const ADMIN: &str = "ROLE_ADMIN";

/// Services acting on behalf of one fixed caller.
pub type Services = MovieRatingServices<FixtureAuthenticationResolver>;

/// Settings with every value left at its default.
pub fn default_settings() -> CatalogueSettings {
    CatalogueSettings {
        default_page_size: None,
        max_page_size: None,
        log_json: false,
        log_filter: None,
    }
}

/// Build the services as seen by `username`.
pub fn services_for(store: &InMemoryStore, username: &str) -> Services {
    MovieRatingServices::in_memory(
        store,
        Arc::new(FixtureAuthenticationResolver::authenticated(username)),
        &default_settings(),
    )
}

/// Build the services for an anonymous caller.
pub fn anonymous_services(store: &InMemoryStore) -> Services {
    MovieRatingServices::in_memory(
        store,
        Arc::new(FixtureAuthenticationResolver::anonymous()),
        &default_settings(),
    )
}

/// Seed a client user named `username`.
pub fn seed_client(store: &InMemoryStore, username: &str) -> User {
    store
        .insert_user(
            username,
            "$2a$10$eACCYoNOHEqXve8aIWT8Nu3PkMXWBaOxJ9aORUYzfMQCbVBIhZ8tG",
            [Role::new(1, CLIENT).expect("valid role")],
        )
        .expect("seed user")
}

/// Seed an admin who is also a client.
pub fn seed_admin(store: &InMemoryStore, username: &str) -> User {
    store
        .insert_user(
            username,
            "$2a$10$eACCYoNOHEqXve8aIWT8Nu3PkMXWBaOxJ9aORUYzfMQCbVBIhZ8tG",
            [
                Role::new(1, CLIENT).expect("valid role"),
                Role::new(2, ADMIN).expect("valid role"),
            ],
        )
        .expect("seed user")
}

/// Seed a movie titled `title`.
pub fn seed_movie(store: &InMemoryStore, title: &str) -> MovieId {
    store
        .insert_movie(MovieInput::titled(title))
        .expect("seed movie")
        .id()
}
