//! Top-level HTML-mode entry point: parse, resolve the filter chain, and
//! dispatch to the chosen tag-maker (spec §4).

use crate::error::ExpandError;
use crate::filters::{self, TagMakerKind};
use crate::html::ast::Expr;
use crate::options::Options;
use crate::tables::Tables;

use super::parser;
use super::tagmakers::{commented, haml, hiccup, html, RenderCtx};

/// Expand an HTML-mode abbreviation to a string.
pub fn expand(input: &str, tables: &Tables, options: &Options) -> Result<String, ExpandError> {
    let expr = parser::parse(input, tables)?;

    let explicit_filters: &[String] = match &expr {
        Expr::Filter { filters, .. } => filters,
        _ => &[],
    };
    let resolved = filters::resolve(explicit_filters, options);

    let body: &Expr = match &expr {
        Expr::Filter { body, .. } => body,
        other => other,
    };

    let ctx = RenderCtx { tables, options };

    let rendered = match resolved.maker {
        TagMakerKind::Html => html::render(body, &ctx, 0),
        TagMakerKind::Commented => commented::render(body, &ctx, 0),
        TagMakerKind::Haml => haml::render(body, &ctx, 0),
        TagMakerKind::Hiccup => hiccup::render(body, &ctx, 0),
    }?;

    // The `e` filter is a post-pass over the whole rendered string, not a
    // per-fragment concern of the formatters above.
    Ok(if resolved.escape {
        super::escape::escape(&rendered)
    } else {
        rendered
    })
}
