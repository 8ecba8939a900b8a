//! Configuration options for the abbreviation expansion engine

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tables::Tables;

/// Which dialect an abbreviation should be expanded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// HTML-like expansion (elements, attributes, children, siblings, …).
    Html,
    /// CSS property-shorthand expansion.
    Css,
    /// CSS property-shorthand expansion using the Sass snippet table.
    Sass,
}

/// How a self-closing tag's closing angle bracket is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfClosingStyle {
    /// `<br />`
    SpaceSlash,
    /// `<br/>`
    Slash,
    /// `<br>`
    None,
}

impl SelfClosingStyle {
    /// The literal text emitted before the closing `>`.
    pub fn suffix(self) -> &'static str {
        match self {
            SelfClosingStyle::SpaceSlash => " />",
            SelfClosingStyle::Slash => "/>",
            SelfClosingStyle::None => ">",
        }
    }
}

impl Default for SelfClosingStyle {
    fn default() -> Self {
        SelfClosingStyle::SpaceSlash
    }
}

/// How hex colors are letter-cased on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCase {
    /// Preserve whatever case the user typed.
    Auto,
    /// Force uppercase hex digits.
    Upper,
    /// Force lowercase hex digits.
    Lower,
}

impl Default for ColorCase {
    fn default() -> Self {
        ColorCase::Auto
    }
}

/// Configuration for a single [`crate::expand`] call.
///
/// `tables` is deliberately excluded from `Serialize`/`Deserialize`: the JSON
/// documents backing it are loaded separately (see [`Tables::from_json`]) and
/// plugged in here as a test seam, not serialised alongside the toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Number of spaces used for one level of indentation.
    pub indent_width: usize,

    /// How self-closing tags render their closing bracket.
    pub self_closing_style: SelfClosingStyle,

    /// Whether to render JSX-flavoured attributes (`className`, `htmlFor`, …).
    pub jsx: bool,

    /// In JSX mode, render the class list as `{a.b.c}` instead of `"a b c"`.
    pub jsx_braces_for_class: bool,

    /// Use the Sass snippet table and Sass rendering rules for CSS mode.
    pub sass_syntax: bool,

    /// Letter-casing applied to rendered hex colors.
    pub color_case: ColorCase,

    /// Whether 6-digit hex colors are shortened to 3 digits when the pairs match.
    pub color_shorten: bool,

    /// Filter chain to use when an abbreviation has none, keyed by file extension.
    pub default_filter_by_ext: HashMap<String, Vec<String>>,

    /// Filter chain used when no extension-specific default applies.
    pub fallback_filter: Vec<String>,

    /// Seed for the lorem-ipsum generator; two calls with the same seed and
    /// abbreviation produce byte-identical output.
    pub lorem_seed: u64,

    /// Snippet/preference tables to expand against.
    ///
    /// `None` defers to the process-wide embedded defaults
    /// ([`crate::tables::default_tables`]). Set this to substitute caller-supplied
    /// JSON documents, e.g. in tests.
    #[serde(skip)]
    pub tables: Option<Arc<Tables>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent_width: 2,
            self_closing_style: SelfClosingStyle::default(),
            jsx: false,
            jsx_braces_for_class: false,
            sass_syntax: false,
            color_case: ColorCase::default(),
            color_shorten: true,
            default_filter_by_ext: HashMap::new(),
            fallback_filter: vec!["html".to_string()],
            lorem_seed: 0,
            tables: None,
        }
    }
}

impl Options {
    /// Options with the given indent width, otherwise default.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            ..Default::default()
        }
    }

    /// Set the self-closing style.
    pub fn with_self_closing_style(mut self, style: SelfClosingStyle) -> Self {
        self.self_closing_style = style;
        self
    }

    /// Toggle JSX-flavoured attribute rendering.
    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = jsx;
        self
    }

    /// Set the lorem-ipsum seed.
    pub fn with_lorem_seed(mut self, seed: u64) -> Self {
        self.lorem_seed = seed;
        self
    }

    /// Substitute the snippet/preference tables used by this call.
    pub fn with_tables(mut self, tables: Arc<Tables>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Resolve the tables to use: caller-supplied, else the embedded defaults.
    pub fn resolve_tables(&self) -> Arc<Tables> {
        match &self.tables {
            Some(t) => Arc::clone(t),
            None => Arc::clone(crate::tables::default_tables()),
        }
    }
}
