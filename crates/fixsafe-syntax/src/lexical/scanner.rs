//! Forward-only lexical scanner.
//!
//! The scanner walks a buffer one lexical unit at a time, tracking whether it
//! is in code, a string, a comment, a regular-expression literal or template
//! text. Two-byte units (`//`, `/*`, `*/`, `${` and backslash escapes) are
//! consumed atomically, so an offset falling between their bytes observes the
//! state after the unit.
//!
//! Whether a `/` opens a regular expression is decided by looking back over
//! whitespace at the previous byte, without consulting a token stream. The
//! rule is knowingly incomplete (for example `a++ / 2` opens a regex) and is
//! kept stable because fixers depend on its exact boundaries.

use super::context::{CommentKind, LexicalContext, QuoteKind};

/// Punctuation after which a `/` starts a regular-expression literal.
const REGEX_PRECEDING_PUNCTUATION: &[u8] = b"([{,;:!&|?+-*/%=<>^~";

/// Keywords after which a `/` starts a regular-expression literal.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "throw",
    "case",
    "in",
    "of",
    "delete",
    "void",
    "typeof",
    "new",
    "instanceof",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    String(QuoteKind),
    TemplateText,
    Comment(CommentKind),
    Regex,
}

/// What a scanned unit was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// An ordinary code byte, including the newline ending a line comment.
    Code(u8),
    /// Opening delimiter of a string, template, regex or comment.
    Open,
    /// Closing delimiter of a string, template, regex or block comment.
    Close,
    /// The `${` opening a template substitution.
    SubstitutionOpen,
    /// The `}` closing a template substitution.
    SubstitutionClose,
    /// Literal or comment content, escape pairs included.
    Content,
}

/// A single lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Byte offset of the unit.
    pub start: usize,
    /// Length in bytes (one or two).
    pub len: usize,
    /// Classification of the unit.
    pub kind: StepKind,
}

/// Incremental left-to-right scanner over one buffer.
///
/// Scanning from the start to an offset always yields the same state, however
/// the walk is split into calls, so a single scanner can serve a sequence of
/// increasing offsets.
#[derive(Debug, Clone)]
pub struct LexicalScanner<'a> {
    source: &'a [u8],
    position: usize,
    mode: Mode,
    /// One entry per open template literal, innermost last. `Some(depth)`
    /// while inside that template's substitution, counting unclosed `{`.
    templates: Vec<Option<usize>>,
}

impl<'a> LexicalScanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            mode: Mode::Code,
            templates: Vec::new(),
        }
    }

    /// Offset of the next unit to be scanned.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Scans every unit that starts before `offset`.
    pub fn advance_to(&mut self, offset: usize) {
        while self.position < offset && self.step().is_some() {}
    }

    /// Classification of the current position.
    #[must_use]
    pub fn context(&self) -> LexicalContext {
        let mut context = LexicalContext {
            in_template: !self.templates.is_empty(),
            in_template_expression: matches!(self.templates.last(), Some(Some(_))),
            ..LexicalContext::default()
        };
        match self.mode {
            Mode::Code => {}
            Mode::String(quote) => {
                context.in_string = true;
                context.string_char = Some(quote);
            }
            Mode::TemplateText => context.string_char = Some(QuoteKind::Backtick),
            Mode::Comment(kind) => {
                context.in_comment = true;
                context.comment_kind = Some(kind);
            }
            Mode::Regex => context.in_regex = true,
        }
        context
    }

    fn step(&mut self) -> Option<Step> {
        let start = self.position;
        let byte = *self.source.get(start)?;
        let next = self.source.get(start + 1).copied();

        let (len, kind) = match self.mode {
            Mode::Code => self.code_step(start, byte, next),
            Mode::String(quote) => match byte {
                b'\\' => (escape_len(next), StepKind::Content),
                _ if byte == quote.as_byte() => {
                    self.mode = Mode::Code;
                    (1, StepKind::Close)
                }
                _ => (1, StepKind::Content),
            },
            Mode::TemplateText => self.template_step(byte, next),
            Mode::Comment(CommentKind::Single) => {
                if byte == b'\n' {
                    self.mode = Mode::Code;
                    (1, StepKind::Code(byte))
                } else {
                    (1, StepKind::Content)
                }
            }
            Mode::Comment(CommentKind::Multi) => {
                if byte == b'*' && next == Some(b'/') {
                    self.mode = Mode::Code;
                    (2, StepKind::Close)
                } else {
                    (1, StepKind::Content)
                }
            }
            Mode::Regex => match byte {
                b'\\' => (escape_len(next), StepKind::Content),
                b'/' => {
                    self.mode = Mode::Code;
                    (1, StepKind::Close)
                }
                _ => (1, StepKind::Content),
            },
        };

        self.position = start + len;
        Some(Step { start, len, kind })
    }

    fn code_step(&mut self, start: usize, byte: u8, next: Option<u8>) -> (usize, StepKind) {
        match (byte, next) {
            (b'/', Some(b'/')) => {
                self.mode = Mode::Comment(CommentKind::Single);
                (2, StepKind::Open)
            }
            (b'/', Some(b'*')) => {
                self.mode = Mode::Comment(CommentKind::Multi);
                (2, StepKind::Open)
            }
            (b'/', _) if regex_may_start(self.source, start) => {
                self.mode = Mode::Regex;
                (1, StepKind::Open)
            }
            (b'\'', _) => {
                self.mode = Mode::String(QuoteKind::Single);
                (1, StepKind::Open)
            }
            (b'"', _) => {
                self.mode = Mode::String(QuoteKind::Double);
                (1, StepKind::Open)
            }
            (b'`', _) => {
                self.templates.push(None);
                self.mode = Mode::TemplateText;
                (1, StepKind::Open)
            }
            (b'{', _) => {
                if let Some(Some(depth)) = self.templates.last_mut() {
                    *depth += 1;
                }
                (1, StepKind::Code(byte))
            }
            (b'}', _) => {
                if matches!(self.templates.last(), Some(Some(0))) {
                    if let Some(top) = self.templates.last_mut() {
                        *top = None;
                    }
                    self.mode = Mode::TemplateText;
                    return (1, StepKind::SubstitutionClose);
                }
                if let Some(Some(depth)) = self.templates.last_mut() {
                    *depth -= 1;
                }
                (1, StepKind::Code(byte))
            }
            _ => (1, StepKind::Code(byte)),
        }
    }

    fn template_step(&mut self, byte: u8, next: Option<u8>) -> (usize, StepKind) {
        match (byte, next) {
            (b'\\', _) => (escape_len(next), StepKind::Content),
            (b'`', _) => {
                // The enclosing context, if any, is a substitution body.
                self.templates.pop();
                self.mode = Mode::Code;
                (1, StepKind::Close)
            }
            (b'$', Some(b'{')) => {
                if let Some(top) = self.templates.last_mut() {
                    *top = Some(0);
                }
                self.mode = Mode::Code;
                (2, StepKind::SubstitutionOpen)
            }
            _ => (1, StepKind::Content),
        }
    }
}

impl Iterator for LexicalScanner<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// A backslash consumes the following byte, unless it ends the buffer.
const fn escape_len(next: Option<u8>) -> usize {
    if next.is_some() { 2 } else { 1 }
}

pub(crate) const fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte >= 0x80
}

/// Decides whether the `/` at `slash` opens a regular-expression literal.
fn regex_may_start(source: &[u8], slash: usize) -> bool {
    let before = source.get(..slash).unwrap_or_default();
    let Some(end) = before.iter().rposition(|byte| !byte.is_ascii_whitespace()) else {
        return true;
    };
    let Some(&last) = before.get(end) else {
        return true;
    };
    if REGEX_PRECEDING_PUNCTUATION.contains(&last) {
        return true;
    }
    if !is_identifier_byte(last) {
        return false;
    }

    let head = before.get(..=end).unwrap_or_default();
    let word_start = head
        .iter()
        .rposition(|byte| !is_identifier_byte(*byte))
        .map_or(0, |idx| idx + 1);
    let word = head.get(word_start..).unwrap_or_default();
    REGEX_PRECEDING_KEYWORDS
        .iter()
        .any(|keyword| keyword.as_bytes() == word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn code_bytes(source: &str) -> String {
        LexicalScanner::new(source)
            .filter_map(|step| match step.kind {
                StepKind::Code(byte) => Some(char::from(byte)),
                _ => None,
            })
            .collect()
    }

    #[rstest]
    #[case("x = a / b", 6, false)]
    #[case("return /ab/", 7, true)]
    #[case("f(/x/)", 2, true)]
    #[case("/start/", 0, true)]
    #[case("a++ / 2", 4, true)]
    #[case("(a) / 2", 4, false)]
    #[case("typeof /x/", 7, true)]
    #[case("typeofx / 2", 8, false)]
    fn regex_heuristic_follows_the_preceding_token(
        #[case] source: &str,
        #[case] slash: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(regex_may_start(source.as_bytes(), slash), expected);
    }

    #[test]
    fn literal_content_is_not_code() {
        assert_eq!(code_bytes("a('(', /[/, \"{\")"), "a(, , )");
    }

    #[test]
    fn line_comment_ends_with_a_code_newline() {
        assert_eq!(code_bytes("a // {\nb"), "a \nb");
    }

    #[test]
    fn block_comment_closes_on_first_terminator() {
        assert_eq!(code_bytes("a /* { */ b */"), "a  b *");
    }

    #[test]
    fn substitution_braces_are_not_code() {
        let kinds: Vec<StepKind> = LexicalScanner::new("`${x}`").map(|step| step.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Open,
                StepKind::SubstitutionOpen,
                StepKind::Code(b'x'),
                StepKind::SubstitutionClose,
                StepKind::Close,
            ]
        );
    }

    #[test]
    fn object_literal_inside_substitution_keeps_template_open() {
        let mut scanner = LexicalScanner::new("`${ {a: 1} }tail`");
        scanner.advance_to(13);
        let context = scanner.context();
        assert!(context.in_template_text());
        assert_eq!(context.string_char, Some(QuoteKind::Backtick));
    }

    #[test]
    fn nested_template_inside_substitution() {
        let source = "`a${`b${c}`}d`";
        let mut scanner = LexicalScanner::new(source);
        scanner.advance_to(6);
        assert!(scanner.context().in_template_text());
        scanner.advance_to(8);
        assert!(scanner.context().in_template_expression);
        scanner.advance_to(12);
        let context = scanner.context();
        assert!(context.in_template_text());
        assert!(context.in_template);
    }

    #[test]
    fn escape_consumes_the_quote() {
        let mut scanner = LexicalScanner::new(r#""a\"b" + c"#);
        scanner.advance_to(5);
        assert!(scanner.context().in_string);
        scanner.advance_to(7);
        assert!(!scanner.context().in_string);
    }

    #[test]
    fn incremental_and_fresh_scans_agree() {
        let source = "let s = `x${ 'y' }` // done\nvar r = /a\\/b/;";
        let mut incremental = LexicalScanner::new(source);
        for offset in 0..=source.len() {
            incremental.advance_to(offset);
            let mut fresh = LexicalScanner::new(source);
            fresh.advance_to(offset);
            if incremental.position() == fresh.position() {
                assert_eq!(incremental.context(), fresh.context(), "offset {offset}");
            }
        }
    }
}
