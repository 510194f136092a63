//! Port onto the authentication subsystem.
//!
//! The resolver answers one question: which login identity is behind the
//! current call. Services receive it at construction so tests can swap in a
//! fixed principal.

use super::define_port_error;

define_port_error! {
    /// Errors raised when no caller identity can be produced.
    pub enum AuthenticationError {
        /// Nobody is authenticated on the current call.
        Unauthenticated => "no authenticated principal",
        /// The authentication subsystem failed to answer.
        Unavailable { message: String } =>
            "authentication subsystem unavailable: {message}",
    }
}

/// Supplies the login identity of the current caller.
#[cfg_attr(test, mockall::automock)]
pub trait AuthenticationResolver: Send + Sync {
    /// Username of the authenticated caller.
    fn logged_username(&self) -> Result<String, AuthenticationError>;
}

/// Fixture resolver that reports a fixed principal, or none at all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixtureAuthenticationResolver {
    username: Option<String>,
}

impl FixtureAuthenticationResolver {
    /// Resolver that always reports `username`.
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// Resolver for an anonymous caller.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthenticationResolver for FixtureAuthenticationResolver {
    fn logged_username(&self) -> Result<String, AuthenticationError> {
        self.username
            .clone()
            .ok_or_else(AuthenticationError::unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn authenticated_fixture_reports_its_principal() {
        let resolver = FixtureAuthenticationResolver::authenticated("bob@gmail.com");
        assert_eq!(resolver.logged_username().as_deref(), Ok("bob@gmail.com"));
    }

    #[rstest]
    fn anonymous_fixture_fails() {
        let resolver = FixtureAuthenticationResolver::anonymous();
        assert_eq!(
            resolver.logged_username(),
            Err(AuthenticationError::Unauthenticated)
        );
    }
}
