//! Built-in default values for configuration fields.

use fixsafe_syntax::{DEFAULT_CACHE_CAPACITY, DEFAULT_HISTORY_LIMIT, SupportedLanguage};

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default grammar for syntax certification.
#[must_use]
pub const fn default_language() -> SupportedLanguage {
    SupportedLanguage::JavaScript
}

/// Default number of memoised classifications.
#[must_use]
pub const fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

/// Default number of retained fix records.
#[must_use]
pub const fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
