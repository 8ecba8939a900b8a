//! # emmet-expand
//!
//! An abbreviation expansion engine for Emmet-style HTML and CSS shorthand.
//!
//! `expand` is a pure function: given an abbreviation string, a [`Mode`], and
//! an [`Options`] bag, it returns the expanded markup or an [`ExpandError`].
//! There is no editor integration, no abbreviation round-tripping, and no
//! semantic HTML/CSS validation — just the expansion grammar.
//!
//! ## Example
//!
//! ```rust
//! use emmet_expand::{expand, Mode, Options};
//!
//! let html = expand("ul>li*3", Mode::Html, &Options::default()).unwrap();
//! assert_eq!(html, "<ul>\n  <li></li>\n  <li></li>\n  <li></li>\n</ul>");
//!
//! let css = expand("m10+p5", Mode::Css, &Options::default()).unwrap();
//! assert_eq!(css, "margin: 10px;\npadding: 5px;");
//! ```
//!
//! ## Architecture
//!
//! 1. **Parse**: the abbreviation is parsed by a recursive-descent parser
//!    into a small AST ([`html::ast`] for HTML mode, [`css::parser`] for
//!    CSS/Sass mode).
//! 2. **Resolve**: aliases, numbering placeholders (`$`/`@`), and lorem
//!    generation are resolved against the data tables ([`tables`]).
//! 3. **Render**: the AST is handed to the selected tag-maker ([`html::tagmakers`])
//!    or the CSS snippet renderer ([`css::transform`]), picked by the
//!    abbreviation's filter chain ([`filters`]).
//!
//! ## Modules
//!
//! - [`html`]: the HTML-like grammar — AST, parser, renderer, tag-makers.
//! - [`css`]: the CSS-like (and Sass-like) grammar — tokenizer, parser, renderer.
//! - [`tables`]: snippet/alias/preference data, loaded once from embedded JSON.
//! - [`filters`]: resolves an abbreviation's `|`-separated filter chain.
//! - [`numbering`]: `$`/`@` numbering placeholder parsing and instantiation.
//! - [`lorem`]: seeded lorem-ipsum text generation.
//! - [`options`]: caller-configurable behavior (re-exported as [`Options`]).
//! - [`error`]: the [`ExpandError`] error type.

pub mod css;
pub mod error;
pub mod filters;
pub mod html;
pub mod lorem;
pub mod numbering;
pub mod options;
pub mod scanner;
pub mod tables;

pub use error::ExpandError;
pub use options::{ColorCase, Mode, Options, SelfClosingStyle};
pub use tables::Tables;

/// Expand an Emmet-style abbreviation into HTML or CSS markup.
///
/// This is the crate's single entry point. `mode` selects the grammar
/// (`Html` or `Css`/`Sass`); `options` carries indentation, self-closing
/// style, color formatting, the lorem seed, and an optional injected
/// [`Tables`] override.
pub fn expand(input: &str, mode: Mode, options: &Options) -> Result<String, ExpandError> {
    let tables = options.resolve_tables();
    match mode {
        Mode::Html => html::transform::expand(input, &tables, options),
        Mode::Css => css::transform::expand(input, false, &tables, options),
        Mode::Sass => css::transform::expand(input, true, &tables, options),
    }
}
