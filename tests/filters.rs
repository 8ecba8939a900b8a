//! Filter-chain resolution end to end: output-formatter switching, the `e`
//! escape post-filter, and the last-primary-wins tie-break (spec §4.8, §9).

use emmet_expand::{expand, Mode, Options};

#[test]
fn default_filter_chain_is_html() {
    let options = Options::default();
    assert_eq!(expand("p{hi}", Mode::Html, &options).unwrap(), "<p>hi</p>");
}

#[test]
fn explicit_haml_filter_switches_formatter() {
    let options = Options::default();
    assert_eq!(expand("ul>li{x}|haml", Mode::Html, &options).unwrap(), "%ul\n  %li x");
}

#[test]
fn explicit_hiccup_filter_switches_formatter() {
    let options = Options::default();
    assert_eq!(expand("p{hi}|hic", Mode::Html, &options).unwrap(), "[:p \"hi\"]");
}

#[test]
fn commented_filter_appends_block_comment() {
    let options = Options::default();
    assert_eq!(
        expand("div#main>p|c", Mode::Html, &options).unwrap(),
        "<div id=\"main\">\n  <p></p>\n</div>  <!-- /div#main -->"
    );
}

#[test]
fn escape_filter_runs_after_formatting() {
    let options = Options::default();
    assert_eq!(expand("p{<b>}|e", Mode::Html, &options).unwrap(), "<p>&lt;b&gt;</p>");
}

#[test]
fn last_primary_filter_in_chain_wins() {
    let options = Options::default();
    assert_eq!(expand("p{hi}|haml|html", Mode::Html, &options).unwrap(), "<p>hi</p>");
}

#[test]
fn unknown_filter_names_are_ignored_not_rejected() {
    let options = Options::default();
    assert_eq!(expand("p{hi}|bogus", Mode::Html, &options).unwrap(), "<p>hi</p>");
}

#[test]
fn fallback_filter_option_is_used_when_abbreviation_has_none() {
    let mut options = Options::default();
    options.fallback_filter = vec!["haml".to_string()];
    assert_eq!(expand("p{hi}", Mode::Html, &options).unwrap(), "%p hi");
}
