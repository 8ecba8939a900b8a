//! Static, read-mostly data tables: HTML snippets/aliases/tag-settings, CSS
//! snippets/preferences, and the lorem word list (spec §2 item 2, §6).
//!
//! Compiled snippet templates are memoised in place the first time they are
//! rendered ([`SnippetTable::get_compiled`]) — a monotonic cache with no
//! invalidation, exactly as spec §3's Lifecycles section requires.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ExpandError;
use crate::html::ast::Expr;

const EMBEDDED_SNIPPETS_JSON: &str = include_str!("data/snippets.json");
const EMBEDDED_PREFERENCES_JSON: &str = include_str!("data/preferences.json");
const EMBEDDED_LOREM_WORDS_JSON: &str = include_str!("data/lorem_words.json");

/// One piece of a compiled snippet template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Text emitted verbatim.
    Literal(String),
    /// `${N[:default]}` — a positional CSS argument, 0-based after `- 1`.
    Placeholder { index: usize, default: Option<String> },
    /// `${child}` — the HTML sentinel where nested content is inserted.
    Child,
}

/// A snippet template parsed once into [`Piece`]s (design notes §9: "keep
/// templates in a typed form ... memoise the parsed form" rather than
/// compiling to an opaque closure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    pub pieces: Vec<Piece>,
}

/// Parse a raw snippet string into a [`CompiledTemplate`].
pub fn compile(raw: &str) -> CompiledTemplate {
    let chars: Vec<char> = raw.chars().collect();
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '$' && chars.get(i + 1) == Some(&'{') {
            let mut j = i + 2;
            while j < chars.len() && chars[j] != '}' {
                j += 1;
            }
            let inner: String = chars[i + 2..j].iter().collect();
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            if inner == "child" {
                pieces.push(Piece::Child);
            } else {
                let mut split = inner.splitn(2, ':');
                let idx_str = split.next().unwrap_or("").trim();
                let default = split.next().map(|s| s.to_string());
                let index = idx_str.parse::<usize>().unwrap_or(1).saturating_sub(1);
                pieces.push(Piece::Placeholder { index, default });
            }
            i = j + 1;
            continue;
        }
        literal.push(chars[i]);
        i += 1;
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    CompiledTemplate { pieces }
}

impl CompiledTemplate {
    /// Render an HTML snippet: substitute the `${child}` sentinel with `content`.
    pub fn render_child(&self, content: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Child => out.push_str(content),
                Piece::Placeholder { .. } => {}
            }
        }
        out
    }

    /// The highest placeholder index referenced by this template, if any.
    pub fn highest_index(&self) -> Option<usize> {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Placeholder { index, .. } => Some(*index),
                _ => None,
            })
            .max()
    }

    /// Render a CSS snippet from already-stringified args. Excess args beyond
    /// the highest referenced placeholder have been folded into the last
    /// slot by the caller (see `css::transform::render_property`).
    pub fn render_args(&self, args: &[String]) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Child => {}
                Piece::Placeholder { index, default } => {
                    match args.get(*index).filter(|s| !s.is_empty()) {
                        Some(v) => out.push_str(v),
                        None => {
                            if let Some(d) = default {
                                out.push_str(d);
                            }
                        }
                    }
                }
            }
        }
        out
    }
}

/// Raw and memoised-compiled forms of a name→template map.
#[derive(Debug, Default)]
pub struct SnippetTable {
    raw: HashMap<String, String>,
    compiled: RwLock<HashMap<String, Arc<CompiledTemplate>>>,
}

impl SnippetTable {
    pub fn new(raw: HashMap<String, String>) -> Self {
        SnippetTable {
            raw,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// The raw template source for `key`, if any snippet is registered.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    /// Compile (or fetch the memoised compilation of) the snippet for `key`.
    pub fn get_compiled(&self, key: &str) -> Option<Arc<CompiledTemplate>> {
        if let Some(hit) = self.compiled.read().unwrap().get(key) {
            return Some(Arc::clone(hit));
        }
        let raw = self.raw.get(key)?;
        let compiled = Arc::new(compile(raw));
        self.compiled
            .write()
            .unwrap()
            .insert(key.to_string(), Arc::clone(&compiled));
        Some(compiled)
    }
}

/// Per-tag-name rendering defaults (spec §3, "Tag settings").
///
/// A missing entry is equivalent to `TagSettings::default()` (design notes §9).
#[derive(Debug, Clone, Default)]
pub struct TagSettings {
    pub block: bool,
    pub self_closing: bool,
    /// Attribute defaults in declaration order; user-supplied attributes with
    /// the same key take precedence (spec §4.5).
    pub default_attr: Vec<(String, String)>,
}

/// HTML-side tables: snippets, the alias table, and tag settings.
#[derive(Debug)]
pub struct HtmlTables {
    pub snippets: SnippetTable,
    pub aliases: HashMap<String, String>,
    pub tag_settings: HashMap<String, TagSettings>,
    /// Parsed form of each alias's expansion, cached the first time it's
    /// resolved (spec §4.3, "aliases resolve to already-parsed subtrees").
    alias_ast_cache: RwLock<HashMap<String, Expr>>,
}

impl HtmlTables {
    pub fn settings(&self, name: &str) -> TagSettings {
        self.tag_settings.get(name).cloned().unwrap_or_default()
    }

    /// The raw expansion string registered for alias `name`, if any.
    pub fn alias_raw(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Fetch a cached parsed alias expansion, if one has been resolved
    /// before.
    pub fn cached_alias_ast(&self, name: &str) -> Option<Expr> {
        self.alias_ast_cache.read().unwrap().get(name).cloned()
    }

    /// Cache a freshly parsed alias expansion for `name`.
    pub fn cache_alias_ast(&self, name: &str, expr: Expr) {
        self.alias_ast_cache
            .write()
            .unwrap()
            .insert(name.to_string(), expr);
    }
}

/// CSS-side (or Sass-side) snippet table.
#[derive(Debug)]
pub struct CssTables {
    pub snippets: SnippetTable,
}

/// CSS preferences shared between the `css` and `sass` dialects (spec §6).
#[derive(Debug, Clone)]
pub struct CssPreferences {
    /// `preferences.json`'s `css.color` sub-document; carried for fidelity
    /// with the source data but not consulted at render time — callers
    /// control casing/shortening explicitly via [`crate::options::Options`]
    /// (see DESIGN.md).
    pub color_case_default: String,
    pub color_shorten_default: bool,
    pub float_unit: String,
    pub int_unit: String,
    pub keyword_aliases: HashMap<String, String>,
    pub keywords: HashMap<String, Vec<String>>,
    pub unit_aliases: HashMap<String, String>,
    pub unitless_properties: HashSet<String>,
    pub vendor_prefixes_properties: HashMap<String, Vec<String>>,
}

/// The full set of snippet/preference tables an expansion runs against.
#[derive(Debug)]
pub struct Tables {
    pub html: HtmlTables,
    pub css: CssTables,
    pub sass: CssTables,
    pub css_preferences: CssPreferences,
    pub lorem_words: Vec<String>,
}

// --- JSON document shapes (spec §6) -----------------------------------

#[derive(Debug, Deserialize)]
struct SnippetsDoc {
    html: HtmlSnippetsDoc,
    css: CssSnippetsDoc,
    sass: CssSnippetsDoc,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HtmlSnippetsDoc {
    snippets: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CssSnippetsDoc {
    snippets: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PreferencesDoc {
    html: HtmlPreferencesDoc,
    css: CssPreferencesDoc,
}

#[derive(Debug, Deserialize)]
struct HtmlPreferencesDoc {
    #[serde(default)]
    tags: HashMap<String, TagSettingsDoc>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct TagSettingsDoc {
    block: bool,
    self_closing: bool,
    default_attr: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CssPreferencesDoc {
    color: ColorPrefsDoc,
    float_unit: String,
    int_unit: String,
    #[serde(default)]
    keyword_aliases: HashMap<String, String>,
    #[serde(default)]
    keywords: HashMap<String, Vec<String>>,
    #[serde(default)]
    unit_aliases: HashMap<String, String>,
    #[serde(default)]
    unitless_properties: Vec<String>,
    #[serde(default)]
    vendor_prefixes_properties: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorPrefsDoc {
    case: String,
    shorten_hex: bool,
}

impl Tables {
    /// Build [`Tables`] from caller-supplied JSON documents, the required
    /// "injectable tables" test seam (spec §8).
    pub fn from_json(snippets_json: &str, preferences_json: &str) -> Result<Tables, ExpandError> {
        let snippets: SnippetsDoc = serde_json::from_str(snippets_json)?;
        let preferences: PreferencesDoc = serde_json::from_str(preferences_json)?;

        let tag_settings = preferences
            .html
            .tags
            .into_iter()
            .map(|(name, doc)| {
                let default_attr = doc
                    .default_attr
                    .into_iter()
                    .map(|(k, v)| (k, value_to_string(&v)))
                    .collect();
                (
                    name,
                    TagSettings {
                        block: doc.block,
                        self_closing: doc.self_closing,
                        default_attr,
                    },
                )
            })
            .collect();

        let html = HtmlTables {
            snippets: SnippetTable::new(snippets.html.snippets),
            aliases: snippets.html.aliases,
            tag_settings,
            alias_ast_cache: RwLock::new(HashMap::new()),
        };
        let css = CssTables {
            snippets: SnippetTable::new(snippets.css.snippets),
        };
        let sass = CssTables {
            snippets: SnippetTable::new(snippets.sass.snippets),
        };
        let css_preferences = CssPreferences {
            color_case_default: preferences.css.color.case,
            color_shorten_default: preferences.css.color.shorten_hex,
            float_unit: preferences.css.float_unit,
            int_unit: preferences.css.int_unit,
            keyword_aliases: preferences.css.keyword_aliases,
            keywords: preferences.css.keywords,
            unit_aliases: preferences.css.unit_aliases,
            unitless_properties: preferences.css.unitless_properties.into_iter().collect(),
            vendor_prefixes_properties: preferences.css.vendor_prefixes_properties,
        };

        Ok(Tables {
            html,
            css,
            sass,
            css_preferences,
            lorem_words: default_lorem_words(),
        })
    }

    /// Build [`Tables`] from the crate's embedded default documents.
    pub fn embedded() -> Tables {
        Tables::from_json(EMBEDDED_SNIPPETS_JSON, EMBEDDED_PREFERENCES_JSON)
            .expect("embedded snippets/preferences JSON is well-formed")
    }
}

fn value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_lorem_words() -> Vec<String> {
    serde_json::from_str(EMBEDDED_LOREM_WORDS_JSON)
        .expect("embedded lorem word list is well-formed")
}

static DEFAULT_TABLES: Lazy<Arc<Tables>> = Lazy::new(|| Arc::new(Tables::embedded()));

/// The process-wide default tables, loaded once from the embedded JSON.
pub fn default_tables() -> &'static Arc<Tables> {
    &DEFAULT_TABLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_child_sentinel() {
        let t = compile("<div>${child}</div>");
        assert_eq!(t.render_child("hi"), "<div>hi</div>");
    }

    #[test]
    fn compiles_positional_with_default() {
        let t = compile("margin: ${1:0};");
        assert_eq!(t.render_args(&["10px".to_string()]), "margin: 10px;");
        assert_eq!(t.render_args(&[]), "margin: 0;");
    }

    #[test]
    fn snippet_table_memoises_compiled_form() {
        let mut raw = HashMap::new();
        raw.insert("m".to_string(), "margin: ${1};".to_string());
        let table = SnippetTable::new(raw);
        let a = table.get_compiled("m").unwrap();
        let b = table.get_compiled("m").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn embedded_tables_load() {
        let tables = Tables::embedded();
        assert!(tables.html.aliases.contains_key("bq"));
        assert!(tables.css.snippets.raw("m").is_some());
        assert!(!tables.lorem_words.is_empty());
    }
}
