//! Configuration for diagnostics.

use std::sync::{LazyLock, PoisonError, RwLock};

/// Configuration for failure diagnostics.
///
/// Controls how much of a rejected batch is rendered into error messages and
/// whether wrapped failures are logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Maximum number of entries kept in a [`Sample`](crate::Sample).
    pub sample_size: usize,

    /// Maximum number of characters of a rendered value.
    pub max_rendered_len: usize,

    /// Emit a `tracing` debug event whenever an operation failure is wrapped.
    pub log_failures: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            max_rendered_len: 80,
            log_failures: true,
        }
    }
}

static CURRENT: LazyLock<RwLock<DiagnosticsConfig>> =
    LazyLock::new(|| RwLock::new(DiagnosticsConfig::default()));

impl DiagnosticsConfig {
    /// Creates a configuration for debugging with large samples.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            sample_size: 20,
            max_rendered_len: 500,
            log_failures: true,
        }
    }

    /// Creates a terse configuration that does not log.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            sample_size: 3,
            max_rendered_len: 40,
            log_failures: false,
        }
    }

    /// Builder method to set the sample size.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Builder method to set the rendered value length limit.
    #[must_use]
    pub fn with_max_rendered_len(mut self, len: usize) -> Self {
        self.max_rendered_len = len;
        self
    }

    /// Builder method to enable/disable failure logging.
    #[must_use]
    pub fn with_log_failures(mut self, log: bool) -> Self {
        self.log_failures = log;
        self
    }

    /// Installs this configuration process-wide, returning the previous one.
    pub fn install(self) -> Self {
        let mut current = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, self)
    }

    /// Returns the process-wide configuration.
    #[must_use]
    pub fn current() -> Self {
        CURRENT
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
