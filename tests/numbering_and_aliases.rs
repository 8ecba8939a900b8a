//! Universal properties from spec §8: numbering round-trips, alias
//! fixed-point caching, the self-closing invariant, and `(X)*N` cloning.

use emmet_expand::{expand, Mode, Options};

#[test]
fn ascending_numbering_round_trips() {
    let options = Options::default();
    let actual = expand("p*3>{a$$$}", Mode::Html, &options).unwrap();
    assert_eq!(
        actual,
        "<p>a001</p>\n<p>a002</p>\n<p>a003</p>"
    );
}

#[test]
fn descending_numbering_round_trips() {
    let options = Options::default();
    let actual = expand("p*3>{a$@-}", Mode::Html, &options).unwrap();
    assert_eq!(actual, "<p>a3</p>\n<p>a2</p>\n<p>a1</p>");
}

#[test]
fn grouped_multiplier_produces_n_newline_joined_clones() {
    let options = Options::default();
    let actual = expand("(span{x$})*4", Mode::Html, &options).unwrap();
    let lines: Vec<&str> = actual.split('\n').collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines, vec!["<span>x1</span>", "<span>x2</span>", "<span>x3</span>", "<span>x4</span>"]);
}

#[test]
fn self_closing_tags_never_emit_a_closing_tag() {
    let options = Options::default();
    let rendered = expand("img*2", Mode::Html, &options).unwrap();
    assert!(!rendered.contains("</img>"));
}

#[test]
fn alias_expansion_is_deterministic_across_repeated_calls() {
    let options = Options::default();
    let first = expand("bq", Mode::Html, &options).unwrap();
    let second = expand("bq", Mode::Html, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "<blockquote></blockquote>");
}

#[test]
fn alias_caller_classes_union_with_the_expansion() {
    let options = Options::default();
    let actual = expand("bq.note", Mode::Html, &options).unwrap();
    assert_eq!(actual, "<blockquote class=\"note\"></blockquote>");
}

#[test]
fn expand_is_pure_given_the_same_seed() {
    let options = Options::default().with_lorem_seed(42);
    let a = expand("lorem5", Mode::Html, &options).unwrap();
    let b = expand("lorem5", Mode::Html, &options).unwrap();
    assert_eq!(a, b);
}
