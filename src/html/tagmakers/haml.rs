//! The `haml` formatter: Ruby HAML's `%tag#id.class{...} text` syntax,
//! indentation-significant instead of closing-tag-significant.

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

fn render_tag(
    tag: &TagNode,
    nested: Option<String>,
    ctx: &RenderCtx,
    depth: usize,
) -> Result<String, ExpandError> {
    let name = tag.name.instantiate(0, 1);
    let pad = indent(ctx, depth);
    let (id, classes, props) = resolve_attrs(tag, ctx.tables);

    let mut head = String::new();
    let omit_name = name == "div" && (id.is_some() || !classes.is_empty());
    if !omit_name {
        head.push('%');
        head.push_str(&name);
    }
    if let Some(id) = &id {
        head.push('#');
        head.push_str(id);
    }
    for class in &classes {
        head.push('.');
        head.push_str(class);
    }
    if !props.is_empty() {
        let inner = props
            .iter()
            .map(|(k, v, _)| format!(":{k} => \"{v}\""))
            .collect::<Vec<_>>()
            .join(", ");
        head.push_str(&format!("{{{inner}}}"));
    }

    let text = tag.text.as_ref().map(|t| render_text(ctx, &t.instantiate(0, 1)));
    let mut line = format!("{pad}{head}");
    if let Some(t) = &text {
        line.push(' ');
        line.push_str(t);
    }

    match nested {
        Some(n) if !n.is_empty() => Ok(format!("{line}\n{n}")),
        _ => Ok(line),
    }
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
    fn nested_elements_indent_without_closing_tags() {
        assert_eq!(render_input("ul>li"), "%ul\n  %li");
    }

    #[test]
    fn div_with_class_omits_tag_name() {
        assert_eq!(render_input("div.box"), ".box");
    }

    #[test]
    fn text_and_attrs_render_inline() {
        assert_eq!(render_input("a[href=/x]{go}"), "%a{:href => \"/x\"} go");
    }
}
