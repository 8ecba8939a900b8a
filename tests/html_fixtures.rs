//! Literal HTML-mode scenarios.

use emmet_expand::{expand, Mode, Options};
use similar::TextDiff;

fn assert_expands_to(input: &str, expected: &str) {
    let options = Options::default();
    let actual = expand(input, Mode::Html, &options).unwrap();
    if actual != expected {
        let diff = TextDiff::from_lines(expected, &actual);
        panic!("mismatch for `{input}`:\n{}", diff.unified_diff());
    }
}

#[test]
fn element_with_id_and_multiplied_child() {
    assert_expands_to(
        "ul#name>li.item*2",
        "<ul id=\"name\">\n  <li class=\"item\"></li>\n  <li class=\"item\"></li>\n</ul>",
    );
}

#[test]
fn attribute_shorthand_with_text() {
    assert_expands_to("a[href=#]{click}", "<a href=\"#\">click</a>");
}

#[test]
fn grouped_sibling_under_a_parent() {
    assert_expands_to(
        "div>(header>h1{Hi})+footer{\u{a9}}",
        "<div>\n  <header>\n    <h1>Hi</h1>\n  </header>\n  <footer>\u{a9}</footer>\n</div>",
    );
}

#[test]
fn multiplied_text_carries_distinct_numbering() {
    let options = Options::default();
    let actual = expand("p*3>{item $$}", Mode::Html, &options).unwrap();
    assert_eq!(
        actual,
        "<p>item 01</p>\n<p>item 02</p>\n<p>item 03</p>"
    );
}

#[test]
fn bang_alias_expands_full_document_skeleton() {
    let options = Options::default();
    let actual = expand("!", Mode::Html, &options).unwrap();
    assert!(actual.starts_with("<!doctype html>\n<html lang=\"en\">"));
    assert!(actual.trim_end().ends_with("</html>"));
}

#[test]
fn self_closing_tag_has_no_closing_tag() {
    let options = Options::default();
    let actual = expand("img", Mode::Html, &options).unwrap();
    assert!(!actual.contains("</img>"));
}

#[test]
fn implicit_div_default_on_bare_class() {
    assert_expands_to(".wrap", "<div class=\"wrap\"></div>");
}

#[test]
fn trailing_plus_alias_expands_table_skeleton() {
    assert_expands_to(
        "table+",
        "<table>\n  <tr>\n    <td></td>\n  </tr>\n</table>",
    );
}
