//! Shared rendering context and attribute helpers used by each of the four
//! output formatters (spec §4.5).

pub mod commented;
pub mod haml;
pub mod hiccup;
pub mod html;

use crate::html::ast::TagNode;
use crate::options::Options;
use crate::tables::Tables;

/// Per-expansion rendering context threaded through every formatter.
pub struct RenderCtx<'a> {
    pub tables: &'a Tables,
    pub options: &'a Options,
}

/// `options.indent_width * depth` spaces.
pub fn indent(ctx: &RenderCtx, depth: usize) -> String {
    " ".repeat(ctx.options.indent_width * depth)
}

/// Text content as it appears in the abbreviation, verbatim. The `e`
/// post-filter runs once over the whole rendered output in
/// `html::transform::expand`, not per text fragment here.
pub fn render_text(_ctx: &RenderCtx, s: &str) -> String {
    s.to_string()
}

/// Generate `n` words of lorem-ipsum text.
pub fn render_lorem(ctx: &RenderCtx, n: usize) -> String {
    crate::lorem::generate(&ctx.tables.lorem_words, ctx.options.lorem_seed, n)
}

/// Resolve a tag's id/classes/props against its tag settings' `defaultAttr`,
/// with the abbreviation's own values winning on key conflicts.
pub fn resolve_attrs(
    tag: &TagNode,
    tables: &Tables,
) -> (Option<String>, Vec<String>, Vec<(String, String, bool)>) {
    let name = tag.name.instantiate(0, 1);
    let id = tag.id.as_ref().map(|p| p.instantiate(0, 1));
    let classes: Vec<String> = tag.classes.iter().map(|p| p.instantiate(0, 1)).collect();

    let settings = tables.html.settings(&name);
    let mut props: Vec<(String, String, bool)> = settings
        .default_attr
        .iter()
        .map(|(k, v)| (k.clone(), v.clone(), false))
        .collect();
    for (key, value, is_expr) in &tag.props {
        let value = value.instantiate(0, 1);
        if let Some(existing) = props.iter_mut().find(|(k, _, _)| k == key) {
            existing.1 = value;
            existing.2 = *is_expr;
        } else {
            props.push((key.clone(), value, *is_expr));
        }
    }
    (id, classes, props)
}

/// Render `id`/`class`/other attributes HTML-attribute-style, honouring JSX
/// attribute naming when `options.jsx` is set.
pub fn render_html_attrs(
    id: &Option<String>,
    classes: &[String],
    props: &[(String, String, bool)],
    options: &Options,
) -> String {
    let mut out = String::new();
    if let Some(id) = id {
        out.push_str(&format!(" id=\"{id}\""));
    }
    if !classes.is_empty() {
        let joined = classes.join(" ");
        if options.jsx && options.jsx_braces_for_class {
            out.push_str(&format!(" className={{{}}}", classes.join(".")));
        } else if options.jsx {
            out.push_str(&format!(" className=\"{joined}\""));
        } else {
            out.push_str(&format!(" class=\"{joined}\""));
        }
    }
    for (key, value, is_expr) in props {
        let rendered_key = if options.jsx && key == "for" {
            "htmlFor"
        } else {
            key.as_str()
        };
        if options.jsx && *is_expr {
            out.push_str(&format!(" {rendered_key}={{{value}}}"));
        } else {
            out.push_str(&format!(" {rendered_key}=\"{value}\""));
        }
    }
    out
}
