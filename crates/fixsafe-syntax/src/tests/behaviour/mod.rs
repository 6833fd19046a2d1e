//! Behaviour-driven step definitions for `fixsafe-syntax` scenarios.

mod scenarios;

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{
    FixGuard, FixGuardOptions, LexicalContext, Location, ReplaceResult, SafeZone, SnapshotError,
};

/// State shared across steps.
struct TestWorld {
    guard: FixGuard,
    source: String,
    context: Option<LexicalContext>,
    zone: Option<SafeZone>,
    replacement: Option<ReplaceResult>,
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld {
        guard: FixGuard::new(FixGuardOptions::default()).expect("guard"),
        source: String::new(),
        context: None,
        zone: None,
        replacement: None,
    })
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("the source: {source}")]
fn given_source(world: &RefCell<TestWorld>, source: String) {
    world.borrow_mut().source = source;
}

// =============================================================================
// When Steps
// =============================================================================

#[when("offset {offset} is classified")]
fn when_offset_classified(world: &RefCell<TestWorld>, offset: usize) {
    let mut w = world.borrow_mut();
    let source = w.source.clone();
    let context = w.guard.classify_offset(&source, offset);
    w.context = Some(context);
}

#[when("line {line} column {column} is assessed")]
fn when_location_assessed(world: &RefCell<TestWorld>, line: u32, column: u32) {
    let mut w = world.borrow_mut();
    let source = w.source.clone();
    let zone = w.guard.find_safe_zone(&source, Location::new(line, column));
    w.zone = Some(zone);
}

#[when("{length} bytes at line {line} column {column} are replaced with {replacement}")]
fn when_replaced(
    world: &RefCell<TestWorld>,
    length: usize,
    line: u32,
    column: u32,
    replacement: String,
) {
    let mut w = world.borrow_mut();
    let source = w.source.clone();
    let result = w.guard.safe_replace(
        &source,
        Location::new(line, column),
        length,
        strip_quotes(&replacement),
    );
    w.replacement = Some(result);
}

#[when("{count} fixes are recorded")]
fn when_fixes_recorded(world: &RefCell<TestWorld>, count: u32) {
    let mut w = world.borrow_mut();
    for line in 1..=count {
        w.guard
            .record_fix("no-var", Location::new(line, 1), "var", "let");
    }
}

#[when("the source is saved as snapshot {id}")]
fn when_snapshot_saved(world: &RefCell<TestWorld>, id: String) {
    let mut w = world.borrow_mut();
    let source = w.source.clone();
    w.guard.create_snapshot(&source, strip_quotes(&id));
}

// =============================================================================
// Then Steps
// =============================================================================

fn classified(world: &RefCell<TestWorld>) -> LexicalContext {
    world.borrow().context.expect("offset should be classified")
}

#[then("the offset is inside a string delimited by {quote}")]
fn then_in_string(world: &RefCell<TestWorld>, quote: String) {
    let context = classified(world);
    assert!(context.in_string);
    assert_eq!(
        context.string_char.map(|kind| kind.to_string()),
        Some(quote)
    );
}

#[then("the offset is not inside a regex")]
fn then_not_in_regex(world: &RefCell<TestWorld>) {
    assert!(!classified(world).in_regex);
}

#[then("the offset is inside a regex")]
fn then_in_regex(world: &RefCell<TestWorld>) {
    assert!(classified(world).in_regex);
}

#[then("the offset is template substitution code")]
fn then_substitution_code(world: &RefCell<TestWorld>) {
    let context = classified(world);
    assert!(context.in_template);
    assert!(context.in_template_expression);
    assert!(context.is_code());
}

#[then("the edit is unsafe because {reason}")]
fn then_unsafe_because(world: &RefCell<TestWorld>, reason: String) {
    let w = world.borrow();
    let zone = w.zone.expect("location should be assessed");
    assert!(!zone.is_safe);
    assert_eq!(
        zone.reason.map(|veto| veto.to_string()).as_deref(),
        Some(strip_quotes(&reason))
    );
}

#[then("the replacement fails and the buffer is unchanged")]
fn then_replacement_fails(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let result = w.replacement.as_ref().expect("replacement should run");
    assert!(!result.success);
    assert!(result.failure.is_some());
    assert_eq!(result.buffer, w.source);
}

#[then("the buffer becomes {expected}")]
fn then_buffer_becomes(world: &RefCell<TestWorld>, expected: String) {
    let w = world.borrow();
    let result = w.replacement.as_ref().expect("replacement should run");
    assert!(result.success);
    assert_eq!(result.buffer, strip_quotes(&expected));
}

#[then("the history holds {count} records")]
fn then_history_len(world: &RefCell<TestWorld>, count: usize) {
    assert_eq!(world.borrow().guard.history().len(), count);
}

#[then("the oldest record is on line {line}")]
fn then_oldest_line(world: &RefCell<TestWorld>, line: u32) {
    let w = world.borrow();
    let oldest = w.guard.history().records().next().map(|record| record.line);
    assert_eq!(oldest, Some(line));
}

#[then("the newest record is on line {line}")]
fn then_newest_line(world: &RefCell<TestWorld>, line: u32) {
    let w = world.borrow();
    let newest = w.guard.history().latest().map(|record| record.line);
    assert_eq!(newest, Some(line));
}

#[then("comparing with snapshot {id} reports no changes")]
fn then_snapshot_identical(world: &RefCell<TestWorld>, id: String) {
    let w = world.borrow();
    let diff = w
        .guard
        .compare_with_snapshot(&w.source, strip_quotes(&id))
        .expect("snapshot should exist");
    assert!(diff.identical);
    assert!(!diff.has_changes);
}

#[then("comparing with snapshot {id} fails as not found")]
fn then_snapshot_missing(world: &RefCell<TestWorld>, id: String) {
    let w = world.borrow();
    let result = w.guard.compare_with_snapshot(&w.source, strip_quotes(&id));
    assert!(matches!(result, Err(SnapshotError::NotFound { .. })));
}
