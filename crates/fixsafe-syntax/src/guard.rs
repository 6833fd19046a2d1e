//! The [`FixGuard`] context object.
//!
//! A guard owns everything that outlives a single call: the classifier
//! cache, a parser for the configured language, the fix history and the
//! snapshot store. Its methods take `&mut self`, so a guard serves one caller
//! at a time; concurrent hosts create one guard per worker.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{SnapshotError, SyntaxError};
use crate::extraction::{BodyExtent, Declaration, find_declaration, locate_function_body};
use crate::gate::{ReplaceFailure, ReplaceResult, SafeZone, splice};
use crate::history::{DEFAULT_HISTORY_LIMIT, FixHistory, SnapshotDiff, SnapshotStore};
use crate::language::SupportedLanguage;
use crate::lexical::{ClassifierCache, DEFAULT_CACHE_CAPACITY, LexicalContext, classify, fingerprint};
use crate::position::{Location, offset_of};
use crate::validator::{SyntaxValidator, ValidationResult};

/// Construction options for a [`FixGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixGuardOptions {
    /// Grammar used for syntax certification.
    pub language: SupportedLanguage,
    /// Maximum memoised classifications.
    pub cache_capacity: usize,
    /// Maximum retained fix records.
    pub history_limit: usize,
}

impl Default for FixGuardOptions {
    fn default() -> Self {
        Self {
            language: SupportedLanguage::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Sizes of the guard's stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardStats {
    /// Memoised classifications.
    pub cache_size: usize,
    /// Retained fix records.
    pub history_size: usize,
    /// Stored snapshots.
    pub snapshot_count: usize,
}

/// Safe-edit engine for one language.
#[derive(Debug)]
pub struct FixGuard {
    validator: SyntaxValidator,
    cache: ClassifierCache,
    history: FixHistory,
    snapshots: SnapshotStore,
}

impl FixGuard {
    /// Creates a guard.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] when the language grammar
    /// cannot be loaded.
    pub fn new(options: FixGuardOptions) -> Result<Self, SyntaxError> {
        Ok(Self {
            validator: SyntaxValidator::new(options.language)?,
            cache: ClassifierCache::new(options.cache_capacity),
            history: FixHistory::new(options.history_limit),
            snapshots: SnapshotStore::new(),
        })
    }

    /// Language used for syntax certification.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.validator.language()
    }

    /// Classifies a byte offset, consulting the cache first.
    pub fn classify_offset(&mut self, source: &str, offset: usize) -> LexicalContext {
        if offset > source.len() {
            return LexicalContext::default();
        }
        let key = fingerprint(source);
        if let Some(context) = self.cache.get(&key, source.len(), offset) {
            debug!(target: "fixsafe::classifier", offset, "cache hit");
            return context;
        }
        debug!(target: "fixsafe::classifier", offset, "cache miss");
        let context = classify(source, offset);
        self.cache.insert(&key, source.len(), offset, context);
        context
    }

    /// Classifies a location. Locations outside the buffer yield the default
    /// context.
    pub fn classify(&mut self, source: &str, location: Location) -> LexicalContext {
        match offset_of(source, location) {
            Ok(offset) => self.classify_offset(source, offset),
            Err(error) => {
                debug!(target: "fixsafe::classifier", %error, "location outside buffer");
                LexicalContext::default()
            }
        }
    }

    /// Decides whether an edit at `location` is safe.
    pub fn find_safe_zone(&mut self, source: &str, location: Location) -> SafeZone {
        let zone = match offset_of(source, location) {
            Ok(offset) => SafeZone::assess(self.classify_offset(source, offset)),
            Err(_) => SafeZone::out_of_bounds(),
        };
        debug!(
            target: "fixsafe::gate",
            line = location.line,
            column = location.column,
            is_safe = zone.is_safe,
            "safe zone assessed"
        );
        zone
    }

    /// Replaces `length` bytes at `location` when the location is safe and
    /// the edited buffer still validates.
    ///
    /// Every failure returns the original buffer unchanged.
    pub fn safe_replace(
        &mut self,
        source: &str,
        location: Location,
        length: usize,
        replacement: &str,
    ) -> ReplaceResult {
        let offset = match offset_of(source, location) {
            Ok(offset) => offset,
            Err(error) => {
                return reject(
                    source,
                    ReplaceFailure::InvalidRange {
                        message: error.to_string(),
                    },
                    Vec::new(),
                );
            }
        };

        let zone = SafeZone::assess(self.classify_offset(source, offset));
        if let Some(reason) = zone.reason {
            return reject(source, ReplaceFailure::Unsafe { reason }, Vec::new());
        }

        let edited = match splice(source, offset, length, replacement) {
            Ok(edited) => edited,
            Err(failure) => return reject(source, failure, Vec::new()),
        };

        let validation = self.validator.validate(&edited);
        if !validation.is_valid {
            let error = validation.error.unwrap_or_default();
            return reject(
                source,
                ReplaceFailure::InvalidSyntax { error },
                validation.warnings,
            );
        }
        ReplaceResult::applied(edited, Vec::new())
    }

    /// Certifies the syntax of `source`.
    pub fn validate_syntax(&mut self, source: &str) -> ValidationResult {
        self.validator.validate(source)
    }

    /// Certifies `after` and reports drift from `before`.
    pub fn validate_semantics(&mut self, before: &str, after: &str) -> ValidationResult {
        self.validator.validate_semantics(before, after)
    }

    /// Appends a record to the fix history.
    pub fn record_fix(
        &mut self,
        rule_id: &str,
        location: Location,
        original_text: &str,
        fixed_text: &str,
    ) {
        self.history
            .record(rule_id, location, original_text, fixed_text);
    }

    /// The fix history.
    #[must_use]
    pub const fn history(&self) -> &FixHistory {
        &self.history
    }

    /// Stores a copy of `source` under `id`.
    pub fn create_snapshot(&mut self, source: &str, id: &str) {
        self.snapshots.create(id, source);
    }

    /// Compares `source` with a stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] for an unknown identifier.
    pub fn compare_with_snapshot(
        &self,
        source: &str,
        id: &str,
    ) -> Result<SnapshotDiff, SnapshotError> {
        self.snapshots.compare(id, source)
    }

    /// Returns the buffer stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] for an unknown identifier.
    pub fn revert_to_snapshot(&self, id: &str) -> Result<String, SnapshotError> {
        self.snapshots.get(id).map(str::to_owned)
    }

    /// Extracts the function starting at `marker` through its closing brace.
    ///
    /// Returns `None` when the marker is absent, and the marker itself when
    /// the braces never close or the fragment does not parse.
    pub fn extract_function_body(&mut self, source: &str, marker: &str) -> Option<String> {
        let fragment = match locate_function_body(source, marker)? {
            BodyExtent::Complete(range) => source.get(range)?,
            BodyExtent::Unterminated { start } => {
                warn!(target: "fixsafe::extraction", start, "function body never closes");
                return Some(marker.to_owned());
            }
        };
        if self.validator.validate(fragment).is_valid {
            Some(fragment.to_owned())
        } else {
            warn!(target: "fixsafe::extraction", "extracted function does not parse");
            Some(marker.to_owned())
        }
    }

    /// Finds the declaration of `identifier`.
    #[must_use]
    pub fn extract_declaration(&self, source: &str, identifier: &str) -> Option<Declaration> {
        find_declaration(source, identifier)
    }

    /// Drops every memoised classification.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Current store sizes.
    #[must_use]
    pub fn stats(&self) -> GuardStats {
        GuardStats {
            cache_size: self.cache.len(),
            history_size: self.history.len(),
            snapshot_count: self.snapshots.len(),
        }
    }
}

fn reject(source: &str, failure: ReplaceFailure, warnings: Vec<String>) -> ReplaceResult {
    warn!(target: "fixsafe::gate", %failure, "replacement rejected");
    ReplaceResult::rejected(source, failure, warnings)
}
