//! Tracing subscriber initialisation.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::CatalogueSettings;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns `false` when a
/// subscriber was already installed; the existing one stays in place.
pub fn init_tracing(settings: &CatalogueSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    let builder = fmt().with_env_filter(filter);
    let result = if settings.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "tracing init failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_initialisation_is_reported_not_fatal() {
        let settings = CatalogueSettings {
            default_page_size: None,
            max_page_size: None,
            log_json: true,
            log_filter: Some("movie_ratings=debug".to_owned()),
        };

        init_tracing(&settings);
        assert!(!init_tracing(&settings));
    }
}
