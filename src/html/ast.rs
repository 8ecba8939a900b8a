//! The HTML-like abbreviation grammar's AST (spec §4.2, §4.3) and the
//! post-parse numbering resolution pass (spec §4.4).

use crate::numbering::TextPart;

/// A parsed (but not yet rendered) abbreviation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `a|b|c` — a pipe-chain of tag-maker/post filters wrapping `body`.
    Filter { filters: Vec<String>, body: Box<Expr> },
    /// A flat run produced by multiplying a node with `*N`.
    List(Vec<Expr>),
    /// A single element.
    Tag(TagNode),
    /// A bare text/lorem leaf (only reachable as a `ParentChild` child or a
    /// `Tag.text`, never as a standalone top-level node outside those).
    Text(TextContent),
    /// `parent>child`.
    ParentChild { parent: Box<Expr>, child: Box<Expr> },
    /// `left+right`.
    Sibling { left: Box<Expr>, right: Box<Expr> },
}

/// Leaf text content: either literal (already-numbered) text, or a deferred
/// lorem-ipsum generation request resolved at transform time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Literal(TextPart),
    Lorem(usize),
}

/// One `tag#id.class[attr]{text}` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub name: TextPart,
    /// Whether the abbreviation had an explicit `id`/`class`/`[...]`/`{...}`
    /// body at all — used by the implicit-div default (spec §4.3).
    pub has_body: bool,
    pub id: Option<TextPart>,
    pub classes: Vec<TextPart>,
    /// `(name, value, is_expr)` — `is_expr` marks a value parsed from JSX-style
    /// `{…}` syntax rather than a bare or quoted string (spec §4.2, §4.5).
    pub props: Vec<(String, TextPart, bool)>,
    pub text: Option<TextPart>,
    pub children: Option<Box<Expr>>,
}

impl TagNode {
    pub fn bare(name: TextPart) -> Self {
        TagNode {
            name,
            has_body: false,
            id: None,
            classes: Vec::new(),
            props: Vec::new(),
            text: None,
            children: None,
        }
    }
}

/// Resolve every [`TextPart::Numberings`] in `expr` against `(index, total)`,
/// rewriting it in place to [`TextPart::Plain`]. Called once at the root with
/// `(0, 1)` after parsing so any numbering directive outside a `*N` context
/// still resolves (spec §4.4, "numbering with no multiplication").
pub fn resolve_numbering(expr: &mut Expr, index: usize, total: usize) {
    match expr {
        Expr::Filter { body, .. } => resolve_numbering(body, index, total),
        Expr::List(items) => {
            for item in items {
                resolve_numbering(item, index, total);
            }
        }
        Expr::Tag(tag) => {
            resolve_part(&mut tag.name, index, total);
            if let Some(id) = &mut tag.id {
                resolve_part(id, index, total);
            }
            for class in &mut tag.classes {
                resolve_part(class, index, total);
            }
            for (_, value, _) in &mut tag.props {
                resolve_part(value, index, total);
            }
            if let Some(text) = &mut tag.text {
                resolve_part(text, index, total);
            }
            if let Some(children) = &mut tag.children {
                resolve_numbering(children, index, total);
            }
        }
        Expr::Text(TextContent::Literal(part)) => resolve_part(part, index, total),
        Expr::Text(TextContent::Lorem(_)) => {}
        Expr::ParentChild { parent, child } => {
            resolve_numbering(parent, index, total);
            resolve_numbering(child, index, total);
        }
        Expr::Sibling { left, right } => {
            resolve_numbering(left, index, total);
            resolve_numbering(right, index, total);
        }
    }
}

fn resolve_part(part: &mut TextPart, index: usize, total: usize) {
    if let TextPart::Numberings(parts) = part {
        let rendered = crate::numbering::instantiate(parts, index, total);
        *part = TextPart::Plain(rendered);
    }
}

/// Deep-clone `expr` and resolve its numbering against `(index, total)` in
/// one step — used when distributing a `*N` multiplication across clones.
pub fn clone_with_numbering(expr: &Expr, index: usize, total: usize) -> Expr {
    let mut cloned = expr.clone();
    resolve_numbering(&mut cloned, index, total);
    cloned
}

/// Attach `child` as the nested content of `parent`, pushing the attachment
/// point down through any wrapper the parent parsed into (a `List` from
/// multiplication, a `Sibling` group, or a chain of aliased `ParentChild`s)
/// so the child always ends up nested inside the innermost real tag — e.g.
/// `table+` expands to `table>tr>td`, and attaching a further `>child` to it
/// must land inside `td`, not wrap the whole `table>tr>td` chain again
/// (spec §4.3, "child attaches to a compound primary").
pub fn attach_child(parent: Expr, child: Expr) -> Expr {
    match parent {
        Expr::ParentChild { parent: p, child: c } => Expr::ParentChild {
            parent: p,
            child: Box::new(attach_child(*c, child)),
        },
        Expr::List(items) => Expr::List(
            items
                .into_iter()
                .map(|item| attach_child(item, child.clone()))
                .collect(),
        ),
        Expr::Sibling { left, right } => Expr::Sibling {
            left: Box::new(attach_child(*left, child.clone())),
            right: Box::new(attach_child(*right, child)),
        },
        Expr::Filter { filters, body } => Expr::Filter {
            filters,
            body: Box::new(attach_child(*body, child)),
        },
        // A literal-text child attached to a bare tag collapses onto the
        // tag's own `text` slot rather than nesting as block content --
        // `p>{item $$}` renders inline the same as `p{item $$}` would.
        Expr::Tag(mut tag) if tag.text.is_none() => {
            if let Expr::Text(TextContent::Literal(part)) = child {
                tag.text = Some(part);
                tag.has_body = true;
                Expr::Tag(tag)
            } else {
                Expr::ParentChild {
                    parent: Box::new(Expr::Tag(tag)),
                    child: Box::new(child),
                }
            }
        }
        other => Expr::ParentChild {
            parent: Box::new(other),
            child: Box::new(child),
        },
    }
}

/// The first `TagNode` reachable by always descending into the leftmost/
/// primary branch — the node an alias's caller-supplied id/classes/props/
/// text get merged onto (spec §4.3, "alias attribute merge").
pub fn first_tag_mut(expr: &mut Expr) -> Option<&mut TagNode> {
    match expr {
        Expr::Tag(tag) => Some(tag),
        Expr::Filter { body, .. } => first_tag_mut(body),
        Expr::List(items) => items.first_mut().and_then(first_tag_mut),
        Expr::ParentChild { parent, .. } => first_tag_mut(parent),
        Expr::Sibling { left, .. } => first_tag_mut(left),
        Expr::Text(_) => None,
    }
}

/// Merge caller-supplied id/classes/props/text from an alias invocation onto
/// the alias expansion's first tag. Id and text are overridden outright;
/// classes are unioned; props are unioned by key with the caller's value
/// winning on conflict (spec §4.3).
pub fn merge_onto_first_tag(
    expanded: &mut Expr,
    id: Option<TextPart>,
    classes: Vec<TextPart>,
    props: Vec<(String, TextPart, bool)>,
    text: Option<TextPart>,
) {
    let Some(tag) = first_tag_mut(expanded) else {
        return;
    };
    if id.is_some() {
        tag.id = id;
    }
    for class in classes {
        if !tag.classes.contains(&class) {
            tag.classes.push(class);
        }
    }
    for (key, value, is_expr) in props {
        if let Some(existing) = tag.props.iter_mut().find(|(k, _, _)| *k == key) {
            existing.1 = value;
            existing.2 = is_expr;
        } else {
            tag.props.push((key, value, is_expr));
        }
    }
    if text.is_some() {
        tag.text = text;
    }
    tag.has_body = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> TextPart {
        TextPart::Plain(s.to_string())
    }

    #[test]
    fn resolve_numbering_rewrites_tag_name() {
        let mut expr = Expr::Tag(TagNode::bare(TextPart::parse("item$")));
        resolve_numbering(&mut expr, 2, 5);
        match expr {
            Expr::Tag(tag) => assert_eq!(tag.name, plain("item3")),
            _ => panic!("expected tag"),
        }
    }

    #[test]
    fn merge_onto_first_tag_unions_classes_and_overrides_id() {
        let mut expanded = Expr::Tag(TagNode::bare(plain("ul")));
        merge_onto_first_tag(
            &mut expanded,
            Some(plain("nav")),
            vec![plain("menu")],
            vec![("role".to_string(), plain("list"))],
            None,
        );
        match &expanded {
            Expr::Tag(tag) => {
                assert_eq!(tag.id, Some(plain("nav")));
                assert_eq!(tag.classes, vec![plain("menu")]);
                assert_eq!(tag.props, vec![("role".to_string(), plain("list"), false)]);
            }
            _ => panic!("expected tag"),
        }
    }

    #[test]
    fn attach_child_descends_into_deepest_parent_child() {
        let compound = Expr::ParentChild {
            parent: Box::new(Expr::Tag(TagNode::bare(plain("table")))),
            child: Box::new(Expr::ParentChild {
                parent: Box::new(Expr::Tag(TagNode::bare(plain("tr")))),
                child: Box::new(Expr::Tag(TagNode::bare(plain("td")))),
            }),
        };
        let attached = attach_child(compound, Expr::Tag(TagNode::bare(plain("span"))));
        match attached {
            Expr::ParentChild { child, .. } => match *child {
                Expr::ParentChild { child, .. } => match *child {
                    Expr::ParentChild { parent, child } => {
                        assert!(matches!(*parent, Expr::Tag(ref t) if t.name == plain("td")));
                        assert!(matches!(*child, Expr::Tag(ref t) if t.name == plain("span")));
                    }
                    other => panic!("expected nested parent-child, got {other:?}"),
                },
                other => panic!("expected nested parent-child, got {other:?}"),
            },
            other => panic!("expected parent-child, got {other:?}"),
        }
    }

    #[test]
    fn first_tag_mut_descends_into_parent_child() {
        let mut expr = Expr::ParentChild {
            parent: Box::new(Expr::Tag(TagNode::bare(plain("ul")))),
            child: Box::new(Expr::Tag(TagNode::bare(plain("li")))),
        };
        assert_eq!(first_tag_mut(&mut expr).unwrap().name, plain("ul"));
    }
}
