//! Search and debounce configuration.
//!
//! # Configuration
//!
//! - `PERMATRIX_SEARCH_THRESHOLD`: normalized distance cut-off in `[0, 1]` (default: 0.3)
//! - `PERMATRIX_DEBOUNCE_MS`: quiet window before a query runs (default: 300)

use std::time::Duration;

use permatrix_search::debounce::DEFAULT_WINDOW;
use permatrix_search::index::{DEFAULT_THRESHOLD, clamp_threshold};

use crate::env_or;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Items scoring above this are discarded. Higher is more lenient.
    pub threshold: f64,

    /// Quiet window after the last keystroke.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            debounce: DEFAULT_WINDOW,
        }
    }
}

impl SearchConfig {
    /// Falls back to defaults for unset or unparsable variables. The
    /// threshold is clamped to `[0, 1]`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
            .with_threshold(env_or("PERMATRIX_SEARCH_THRESHOLD", DEFAULT_THRESHOLD))
            .with_debounce(Duration::from_millis(env_or(
                "PERMATRIX_DEBOUNCE_MS",
                DEFAULT_WINDOW.as_millis() as u64,
            )))
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = clamp_threshold(threshold);
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.threshold, 0.3);
        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(SearchConfig::default().with_threshold(1.5).threshold, 1.0);
        assert_eq!(SearchConfig::default().with_threshold(-0.2).threshold, 0.0);
        assert_eq!(
            SearchConfig::default().with_threshold(f64::NAN).threshold,
            DEFAULT_THRESHOLD
        );
    }

    #[test]
    fn test_config_debug() {
        let config = SearchConfig::default();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("SearchConfig"));
        assert!(debug_str.contains("threshold"));
    }
}
