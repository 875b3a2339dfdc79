//! Permatrix Observability
//!
//! Provides:
//! - Console logging via `tracing-subscriber`, compact or JSON
//! - Counters for dropped permission codes and search evaluations
//!
//! Counters are compiled in with the `metrics` feature (default) and become
//! no-ops without it. Nothing is exported unless the host installs a
//! `metrics` recorder.
//!
//! # Examples
//!
//! ```no_run
//! use permatrix_observability::init_tracing;
//!
//! init_tracing();
//! tracing::info!("ready");
//! ```

pub mod logging;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use logging::{LogFormat, init_tracing};

#[cfg(feature = "metrics")]
pub use metrics::{track_dropped_codes, track_search};

// No-op stubs when metrics are disabled
#[cfg(not(feature = "metrics"))]
pub mod stubs {
    pub fn track_dropped_codes(_source: &'static str, _count: usize) {}
    pub fn track_search(_corpus: &'static str, _matches: usize) {}
}

#[cfg(not(feature = "metrics"))]
pub use stubs::*;
