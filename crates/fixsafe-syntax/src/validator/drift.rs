//! Coarse structural drift between two versions of a buffer.

use serde::Serialize;

use crate::position::line_count;

/// Keywords whose occurrence counts are compared.
pub const DRIFT_KEYWORDS: [&str; 8] = [
    "function", "class", "const", "let", "var", "if", "for", "while",
];

/// Line-count changes above this are flagged.
pub const LINE_DELTA_THRESHOLD: usize = 10;

/// A keyword whose count changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordDelta {
    /// The keyword.
    pub keyword: &'static str,
    /// Occurrences before the edit.
    pub before: usize,
    /// Occurrences after the edit.
    pub after: usize,
}

/// Drift signals for an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    /// Lines in the original buffer.
    pub lines_before: usize,
    /// Lines in the edited buffer.
    pub lines_after: usize,
    /// Absolute difference in line counts.
    pub line_delta: usize,
    /// Keywords with a nonzero count change, in [`DRIFT_KEYWORDS`] order.
    pub keyword_deltas: Vec<KeywordDelta>,
}

impl DriftReport {
    /// Compares `before` with `after`.
    #[must_use]
    pub fn compare(before: &str, after: &str) -> Self {
        let lines_before = line_count(before);
        let lines_after = line_count(after);
        let counts_before = keyword_counts(before);
        let counts_after = keyword_counts(after);

        let keyword_deltas = DRIFT_KEYWORDS
            .iter()
            .zip(counts_before.iter().zip(counts_after.iter()))
            .filter(|(_, (b, a))| b != a)
            .map(|(keyword, (b, a))| KeywordDelta {
                keyword: *keyword,
                before: *b,
                after: *a,
            })
            .collect();

        Self {
            lines_before,
            lines_after,
            line_delta: lines_before.abs_diff(lines_after),
            keyword_deltas,
        }
    }

    /// Returns true when the line delta exceeds [`LINE_DELTA_THRESHOLD`].
    #[must_use]
    pub const fn line_delta_flagged(&self) -> bool {
        self.line_delta > LINE_DELTA_THRESHOLD
    }

    /// One warning per flagged signal.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.line_delta_flagged() {
            warnings.push(format!(
                "line count changed by {} ({} -> {})",
                self.line_delta, self.lines_before, self.lines_after
            ));
        }
        warnings.extend(self.keyword_deltas.iter().map(|delta| {
            format!(
                "keyword '{}' count changed from {} to {}",
                delta.keyword, delta.before, delta.after
            )
        }));
        warnings
    }
}

/// Counts whole-word keyword occurrences. Identifier characters include `$`
/// and `_`, so `$if` or `for_each` do not count.
fn keyword_counts(source: &str) -> [usize; DRIFT_KEYWORDS.len()] {
    let mut counts = [0; DRIFT_KEYWORDS.len()];
    let words = source.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'));
    for word in words {
        if let Some(idx) = DRIFT_KEYWORDS.iter().position(|keyword| *keyword == word)
            && let Some(count) = counts.get_mut(idx)
        {
            *count += 1;
        }
    }
    counts
}
