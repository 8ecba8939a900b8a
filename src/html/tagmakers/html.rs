//! The default `html` formatter: ordinary angle-bracket markup.

use crate::error::ExpandError;
use crate::html::ast::{Expr, TagNode, TextContent};

use super::{indent, render_html_attrs, render_lorem, render_text, resolve_attrs, RenderCtx};

pub fn render(expr: &Expr, ctx: &RenderCtx, depth: usize) -> Result<String, ExpandError> {
    match expr {
        Expr::Filter { body, .. } => render(body, ctx, depth),
        Expr::List(items) => {
            let lines = items
                .iter()
                .map(|item| render(item, ctx, depth))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        Expr::Sibling { left, right } => {
            Ok(format!("{}\n{}", render(left, ctx, depth)?, render(right, ctx, depth)?))
        }
        Expr::ParentChild { parent, child } => {
            let nested = render(child, ctx, depth + 1)?;
            render_parent_like(parent, Some(nested), ctx, depth)
        }
        Expr::Tag(tag) => {
            let nested = tag
                .children
                .as_ref()
                .map(|c| render(c, ctx, depth + 1))
                .transpose()?;
            render_tag(tag, nested, ctx, depth)
        }
        Expr::Text(content) => Ok(format!("{}{}", indent(ctx, depth), render_text_content(content, ctx))),
    }
}

fn render_parent_like(
    parent: &Expr,
    nested: Option<String>,
    ctx: &RenderCtx,
    depth: usize,
) -> Result<String, ExpandError> {
    match parent {
        Expr::Tag(tag) => render_tag(tag, nested, ctx, depth),
        Expr::Text(content) => Ok(format!("{}{}", indent(ctx, depth), render_text_content(content, ctx))),
        other => Err(ExpandError::invalid(format!(
            "parent of a child attachment must be a tag or text node, got {other:?}"
        ))),
    }
}

fn render_text_content(content: &TextContent, ctx: &RenderCtx) -> String {
    match content {
        TextContent::Literal(part) => render_text(ctx, &part.instantiate(0, 1)),
        TextContent::Lorem(n) => render_lorem(ctx, *n),
    }
}

pub(super) fn render_tag(
    tag: &TagNode,
    nested: Option<String>,
    ctx: &RenderCtx,
    depth: usize,
) -> Result<String, ExpandError> {
    let name = tag.name.instantiate(0, 1);
    let pad = indent(ctx, depth);

    if let Some(compiled) = ctx.tables.html.snippets.get_compiled(&name) {
        let inner = nested.unwrap_or_default();
        return Ok(format!("{pad}{}", compiled.render_child(&inner)));
    }

    let settings = ctx.tables.html.settings(&name);
    let (id, classes, props) = resolve_attrs(tag, ctx.tables);
    let attrs = render_html_attrs(&id, &classes, &props, ctx.options);

    if settings.self_closing {
        return Ok(format!("{pad}<{name}{attrs}{}", ctx.options.self_closing_style.suffix()));
    }

    let text = tag.text.as_ref().map(|t| render_text(ctx, &t.instantiate(0, 1)));
    // A block tag (or any content that already spans multiple lines) always
    // gets its own indented lines; an inline tag with single-line content
    // sits on the same line as its open/close tags (spec §4.5).
    let newline_body = |n: &str| settings.block || n.contains('\n');

    let body = match (text, nested) {
        (Some(t), None) => t,
        (None, Some(n)) if n.is_empty() => String::new(),
        (None, Some(n)) if newline_body(&n) => format!("\n{n}\n{pad}"),
        (None, Some(n)) => n.trim_start().to_string(),
        (Some(t), Some(n)) if n.is_empty() => t,
        (Some(t), Some(n)) if newline_body(&n) => format!("{t}\n{n}\n{pad}"),
        (Some(t), Some(n)) => format!("{t}{}", n.trim_start()),
        (None, None) => String::new(),
    };

    Ok(format!("{pad}<{name}{attrs}>{body}</{name}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parser;
    use crate::options::Options;
    use crate::tables::Tables;

    fn render_input(input: &str) -> String {
        let tables = Tables::embedded();
        let options = Options::default();
        let expr = parser::parse(input, &tables).unwrap();
        let ctx = RenderCtx {
            tables: &tables,
            options: &options,
        };
        render(&expr, &ctx, 0).unwrap()
    }

    #[test]
    fn simple_tag_with_text() {
        assert_eq!(render_input("p{hi}"), "<p>hi</p>");
    }

    #[test]
    fn nested_block_indents_children() {
        assert_eq!(render_input("ul>li"), "<ul>\n  <li></li>\n</ul>");
    }

    #[test]
    fn inline_tag_nests_single_line_content_on_one_line() {
        assert_eq!(render_input("a>span"), "<a href=\"\"><span></span></a>");
    }

    #[test]
    fn self_closing_void_element() {
        assert_eq!(render_input("img"), "<img src=\"\" alt=\"\" />");
    }

    #[test]
    fn id_and_classes_render_as_attributes() {
        assert_eq!(render_input("div#main.a.b"), "<div id=\"main\" class=\"a b\"></div>");
    }

    #[test]
    fn doctype_snippet_renders_literal() {
        assert_eq!(render_input("!!!"), "<!doctype html>");
    }
}
