//! Scenario bindings for the `fixsafe-syntax` feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Single quotes nested in a double-quoted string are plain text"
)]
fn nested_quotes_do_not_toggle(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "A slash after an operand is division"
)]
fn slash_after_operand_is_division(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "A slash after return opens a regex"
)]
fn slash_after_return_is_regex(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Template substitutions are code"
)]
fn template_substitution_is_code(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Comment markers inside template text are not comments"
)]
fn comment_markers_in_template_text(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Replacing inside a string leaves the buffer unchanged"
)]
fn replace_inside_string_is_refused(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Replacements that unbalance brackets are rejected"
)]
fn unbalancing_replacement_is_refused(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Replacing a var keyword in code succeeds"
)]
fn replacing_var_succeeds(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "The fix history keeps the most recent hundred records"
)]
fn history_keeps_recent_records(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixsafe_syntax.feature",
    name = "Snapshots report identity and missing identifiers"
)]
fn snapshots_report_identity(world: RefCell<TestWorld>) {
    let _ = world;
}
