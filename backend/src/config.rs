//! Catalogue settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, a configuration file, `MOVIES_*`
//! environment variables, and command-line flags.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::PageLimits;

const DEFAULT_PAGE_SIZE: u32 = 12;
const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for the catalogue services and their logging.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOVIES")]
pub struct CatalogueSettings {
    /// Page size used when a search does not request one.
    pub default_page_size: Option<u32>,
    /// Upper bound on the page size a caller may request.
    pub max_page_size: Option<u32>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl CatalogueSettings {
    /// Page sizes for catalogue searches.
    ///
    /// The maximum is at least one and the default never exceeds it.
    ///
    /// # Examples
    /// ```
    /// use movie_ratings::config::CatalogueSettings;
    ///
    /// let settings = CatalogueSettings {
    ///     default_page_size: Some(50),
    ///     max_page_size: Some(20),
    ///     log_json: false,
    ///     log_filter: None,
    /// };
    /// let limits = settings.page_limits();
    /// assert_eq!((limits.default_size, limits.max_size), (20, 20));
    /// ```
    pub fn page_limits(&self) -> PageLimits {
        let max_size = self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE).max(1);
        let default_size = self
            .default_page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, max_size);
        PageLimits {
            default_size,
            max_size,
        }
    }

    /// Filter directive, falling back to `info`.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalogue configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> CatalogueSettings {
        CatalogueSettings::load_from_iter([OsString::from("movie-ratings")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("MOVIES_DEFAULT_PAGE_SIZE", None::<String>),
            ("MOVIES_MAX_PAGE_SIZE", None::<String>),
            ("MOVIES_LOG_JSON", None::<String>),
            ("MOVIES_LOG_FILTER", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.log_json);
        assert_eq!(settings.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(settings.page_limits(), PageLimits::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MOVIES_DEFAULT_PAGE_SIZE", Some("5".to_owned())),
            ("MOVIES_MAX_PAGE_SIZE", Some("40".to_owned())),
            ("MOVIES_LOG_JSON", Some("true".to_owned())),
            ("MOVIES_LOG_FILTER", Some("movie_ratings=debug".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.log_json);
        assert_eq!(settings.log_filter(), "movie_ratings=debug");
        assert_eq!(
            settings.page_limits(),
            PageLimits {
                default_size: 5,
                max_size: 40,
            }
        );
    }

    #[rstest]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(0), None, 1, 100)]
    #[case(Some(500), Some(50), 50, 50)]
    fn page_limits_stay_consistent(
        #[case] default_page_size: Option<u32>,
        #[case] max_page_size: Option<u32>,
        #[case] default_size: u32,
        #[case] max_size: u32,
    ) {
        let settings = CatalogueSettings {
            default_page_size,
            max_page_size,
            log_json: false,
            log_filter: None,
        };
        assert_eq!(
            settings.page_limits(),
            PageLimits {
                default_size,
                max_size,
            }
        );
    }
}
