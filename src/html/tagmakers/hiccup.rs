//! The `hiccup` formatter: Clojure Hiccup's `[:tag#id.class {:k "v"} "text" child]`
//! vector syntax.

use crate::error::ExpandError;
use crate::html::ast::{Expr, TagNode, TextContent};

use super::{indent, render_lorem, render_text, resolve_attrs, RenderCtx};

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
        Expr::Text(content) => Ok(format!(
            "{}\"{}\"",
            indent(ctx, depth),
            render_text_content(content, ctx)
        )),
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
        Expr::Text(content) => Ok(format!(
            "{}\"{}\"",
            indent(ctx, depth),
            render_text_content(content, ctx)
        )),
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

fn render_tag(
    tag: &TagNode,
    nested: Option<String>,
    ctx: &RenderCtx,
    depth: usize,
) -> Result<String, ExpandError> {
    let name = tag.name.instantiate(0, 1);
    let pad = indent(ctx, depth);
    let (id, classes, props) = resolve_attrs(tag, ctx.tables);

    let mut head = format!(":{name}");
    if let Some(id) = &id {
        head.push('#');
        head.push_str(id);
    }
    for class in &classes {
        head.push('.');
        head.push_str(class);
    }

    let mut parts = vec![head];
    if !props.is_empty() {
        let inner = props
            .iter()
            .map(|(k, v, _)| format!(":{k} \"{v}\""))
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(format!("{{{inner}}}"));
    }
    if let Some(t) = &tag.text {
        parts.push(format!("\"{}\"", render_text(ctx, &t.instantiate(0, 1))));
    }

    let opening = format!("{pad}[{}", parts.join(" "));
    match nested {
        Some(n) if !n.is_empty() => Ok(format!("{opening}\n{n}]")),
        _ => Ok(format!("{opening}]")),
    }
}
