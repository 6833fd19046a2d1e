//! Brace-matched function bodies and variable declaration spans.
//!
//! Both scans are driven by [`LexicalScanner`], so braces, brackets and
//! semicolons inside strings, comments, regexes and template text never
//! count.

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::lexical::{LexicalScanner, StepKind, is_identifier_byte};
use crate::position::line_count;

/// Bytes that leave a statement open across a newline.
const CONTINUATION_BYTES: &[u8] = b"=,+-*/%&|^!~?:.<>([{";

/// Where a function body scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyExtent {
    /// The marker through its matching closing brace.
    Complete(Range<usize>),
    /// No opening brace followed the marker, or it never closed.
    Unterminated {
        /// Byte offset of the marker.
        start: usize,
    },
}

/// Locates the first occurrence of `marker` and the brace-matched block
/// following it.
///
/// Returns `None` when the marker is empty or absent.
#[must_use]
pub fn locate_function_body(source: &str, marker: &str) -> Option<BodyExtent> {
    if marker.is_empty() {
        return None;
    }
    let start = source.find(marker)?;

    let mut scanner = LexicalScanner::new(source);
    scanner.advance_to(start);
    let mut depth = 0_usize;
    let mut opened = false;
    for step in scanner {
        match step.kind {
            StepKind::Code(b'{') => {
                depth += 1;
                opened = true;
            }
            StepKind::Code(b'}') if opened => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(BodyExtent::Complete(start..step.start + 1));
                }
            }
            _ => {}
        }
    }
    Some(BodyExtent::Unterminated { start })
}

/// A located variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Declaration text, from the keyword through its terminator.
    pub text: String,
    /// One-based line the declaration starts on.
    pub start_line: u32,
    /// Byte range of `text` within the buffer.
    pub byte_range: Range<usize>,
}

/// Finds the first `var`, `let` or `const` declaration of `identifier` that
/// starts in code.
///
/// The declaration ends at the first code `;` at bracket depth zero
/// (inclusive). Without a semicolon it ends at the first code newline at
/// depth zero that does not follow an operator, or at the end of the buffer.
#[must_use]
pub fn find_declaration(source: &str, identifier: &str) -> Option<Declaration> {
    let pattern = declaration_pattern(identifier)?;

    let mut scanner = LexicalScanner::new(source);
    let mut search_from = 0;
    while let Some(keyword) = pattern.find_at(source, search_from) {
        // Matches start on an ASCII keyword byte, so the next byte is a
        // char boundary.
        search_from = keyword.start() + 1;
        if !stands_alone(source.as_bytes(), keyword.start(), keyword.end()) {
            continue;
        }
        scanner.advance_to(keyword.start());
        if scanner.position() != keyword.start() || !scanner.context().is_code() {
            continue;
        }
        let end = statement_end(scanner.clone(), source.len());
        let text = source.get(keyword.start()..end)?.trim_end();
        let byte_range = keyword.start()..keyword.start() + text.len();
        let prefix = source.get(..keyword.start())?;
        return Some(Declaration {
            text: text.to_owned(),
            start_line: u32::try_from(line_count(prefix)).unwrap_or(u32::MAX),
            byte_range,
        });
    }
    None
}

fn declaration_pattern(identifier: &str) -> Option<Regex> {
    if identifier.is_empty() {
        return None;
    }
    let escaped = regex::escape(identifier);
    Regex::new(&format!(r"(?:var|let|const)\s+{escaped}")).ok()
}

/// Whether `start..end` is bounded by non-identifier bytes or the buffer
/// edges.
fn stands_alone(bytes: &[u8], start: usize, end: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|index| bytes.get(index))
        .copied();
    let after = bytes.get(end).copied();
    !before.is_some_and(is_identifier_byte) && !after.is_some_and(is_identifier_byte)
}

fn statement_end(mut scanner: LexicalScanner<'_>, buffer_len: usize) -> usize {
    let mut depth = 0_usize;
    let mut last_significant: Option<u8> = None;
    loop {
        // Comments are transparent: closing one keeps the preceding operator.
        let in_comment = scanner.context().in_comment;
        let Some(step) = scanner.next() else {
            break;
        };
        let StepKind::Code(byte) = step.kind else {
            if !in_comment && matches!(step.kind, StepKind::Close | StepKind::SubstitutionClose) {
                last_significant = None;
            }
            continue;
        };
        match byte {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return step.start + 1,
            b'\n' if depth == 0 && !last_significant.is_some_and(continues_statement) => {
                return step.start;
            }
            _ => {}
        }
        if !byte.is_ascii_whitespace() {
            last_significant = Some(byte);
        }
    }
    buffer_len
}

fn continues_statement(byte: u8) -> bool {
    CONTINUATION_BYTES.contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn body_ignores_braces_in_literals_and_comments() {
        let source = "function f() { const s = '}'; /* } */ return `}`; }\nnext();";
        let extent = locate_function_body(source, "function f");
        let expected_end = source.find('\n').expect("newline");
        assert_eq!(extent, Some(BodyExtent::Complete(0..expected_end)));
    }

    #[test]
    fn body_handles_nested_blocks() {
        let source = "x; function g() { if (a) { b(); } }";
        let start = source.find("function").expect("marker");
        assert_eq!(
            locate_function_body(source, "function g"),
            Some(BodyExtent::Complete(start..source.len()))
        );
    }

    #[rstest]
    #[case("function f() { open(", "function f")]
    #[case("function f()", "function f")]
    fn unclosed_body_is_unterminated(#[case] source: &str, #[case] marker: &str) {
        assert_eq!(
            locate_function_body(source, marker),
            Some(BodyExtent::Unterminated { start: 0 })
        );
    }

    #[rstest]
    #[case("function f() {}", "function h")]
    #[case("function f() {}", "")]
    fn missing_marker_yields_none(#[case] source: &str, #[case] marker: &str) {
        assert_eq!(locate_function_body(source, marker), None);
    }

    #[rstest]
    #[case("let a = 1;\nconst total = a + 2;\n", "total", "const total = a + 2;", 2)]
    #[case("var x = { a: 1, b: [2; 3] };", "x", "var x = { a: 1, b: [2; 3] };", 1)]
    #[case("let s = ';'; x();", "s", "let s = ';';", 1)]
    #[case("let y = 1\nfoo()", "y", "let y = 1", 1)]
    #[case("let z =\n  2\nfoo()", "z", "let z =\n  2", 1)]
    #[case("const last = 3", "last", "const last = 3", 1)]
    #[case("// let a\nlet a = 2;", "a", "let a = 2;", 2)]
    #[case("/* let a */let a = 2;", "a", "let a = 2;", 1)]
    #[case("let a = 1 + /* c */\n  2\nfoo()", "a", "let a = 1 + /* c */\n  2", 1)]
    #[case("let a = 'x'\nfoo()", "a", "let a = 'x'", 1)]
    fn declaration_spans_to_its_terminator(
        #[case] source: &str,
        #[case] identifier: &str,
        #[case] expected: &str,
        #[case] line: u32,
    ) {
        let declaration = find_declaration(source, identifier).expect("declaration");
        assert_eq!(declaration.text, expected);
        assert_eq!(declaration.start_line, line);
        assert_eq!(source.get(declaration.byte_range.clone()), Some(expected));
    }

    #[test]
    fn declarations_inside_literals_are_skipped() {
        let source = "// let a = 0;\nconst msg = 'let a = 1;';\nlet a = 2;";
        let declaration = find_declaration(source, "a").expect("declaration");
        assert_eq!(declaration.text, "let a = 2;");
        assert_eq!(declaration.start_line, 3);
    }

    #[rstest]
    #[case("let ab = 1;", "a")]
    #[case("let a$ = 1;", "a")]
    #[case("x = 1;", "x")]
    #[case("let a = 1;", "")]
    fn unrelated_identifiers_do_not_match(#[case] source: &str, #[case] identifier: &str) {
        assert_eq!(find_declaration(source, identifier), None);
    }

    #[test]
    fn identifiers_are_matched_literally() {
        let source = "let $el = document.body;";
        let declaration = find_declaration(source, "$el").expect("declaration");
        assert_eq!(declaration.text, source);
    }
}
