//! Layered configuration for the `fixsafe` tool.
//!
//! [`Config`] is loaded with `ortho_config`, merging built-in defaults, an
//! optional TOML file (`--config-path`), `FIXSAFE_*` environment variables
//! and command-line flags, in increasing order of precedence. Every field is
//! optional; the accessors substitute the defaults from [`defaults`].

pub mod defaults;
pub mod logging;

use fixsafe_syntax::{FixGuardOptions, SupportedLanguage};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_cache_capacity, default_history_limit, default_language,
    default_log_filter, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FIXSAFE")]
pub struct Config {
    /// `tracing` filter directive, for example `info` or `fixsafe=debug`.
    log_filter: Option<String>,
    /// Log output format.
    log_format: Option<LogFormat>,
    /// Grammar used for syntax certification.
    language: Option<SupportedLanguage>,
    /// Maximum memoised classifications.
    cache_capacity: Option<usize>,
    /// Maximum retained fix records.
    history_limit: Option<usize>,
}

impl Config {
    /// Log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Grammar used for syntax certification.
    #[must_use]
    pub fn language(&self) -> SupportedLanguage {
        self.language.unwrap_or_else(default_language)
    }

    /// Maximum memoised classifications.
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity.unwrap_or_else(default_cache_capacity)
    }

    /// Maximum retained fix records.
    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or_else(default_history_limit)
    }

    /// Returns a copy using `language` regardless of the configured one.
    #[must_use]
    pub fn with_language(&self, language: SupportedLanguage) -> Self {
        Self {
            language: Some(language),
            ..self.clone()
        }
    }

    /// Options for constructing a [`fixsafe_syntax::FixGuard`].
    #[must_use]
    pub fn guard_options(&self) -> FixGuardOptions {
        FixGuardOptions {
            language: self.language(),
            cache_capacity: self.cache_capacity(),
            history_limit: self.history_limit(),
        }
    }
}
