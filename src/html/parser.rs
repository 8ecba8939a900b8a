//! Recursive-descent parser for the HTML-like abbreviation grammar
//! (spec §4.2–§4.4): filter chain → siblings (`+`) → chains (`>`) →
//! multiplied primaries (`*N`) → tags/groups.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::ExpandError;
use crate::numbering::TextPart;
use crate::scanner::Cursor;
use crate::tables::Tables;

use super::ast::{
    attach_child, clone_with_numbering, merge_onto_first_tag, resolve_numbering, Expr, TagNode,
    TextContent,
};

/// Parser-wide context: the tables a `parse` call resolves aliases against,
/// and whether JSX-flavoured attribute syntax is in play.
pub struct ParseCtx<'t> {
    pub tables: &'t Tables,
}

/// Parse a full abbreviation (filter chain included) into an [`Expr`].
pub fn parse(input: &str, tables: &Tables) -> Result<Expr, ExpandError> {
    trace!("parsing abbreviation: {input}");
    let (body, filters) = split_filters(input);
    let ctx = ParseCtx { tables };

    let mut cursor = Cursor::new(body);
    let mut expr = parse_sibling(&ctx, &mut cursor)?;
    if !cursor.is_empty() {
        return Err(ExpandError::parse_at(
            format!("unexpected trailing input: {}", cursor.rest()),
            cursor.pos(),
        ));
    }
    resolve_numbering(&mut expr, 0, 1);

    if !filters.is_empty() {
        expr = Expr::Filter {
            filters,
            body: Box::new(expr),
        };
    }
    Ok(expr)
}

/// Split `input` into its body and its `|`-separated filter names, ignoring
/// pipes nested inside `()`/`[]`/`{}` or escaped with `\`.
///
/// The source engine instead does a rightmost reverse search that refuses a
/// candidate split when the tail contains a stray `"` or `}` -- a heuristic
/// that can only ever keep the last filter name in a chain of more than one
/// primary filter (`a|haml|html` would drop `haml` and leave it as unparsed
/// body text). Since the tie-break rule this engine must support ("last
/// primary wins when several are listed") only makes sense if the whole
/// chain is actually recovered, this implementation tracks bracket/quote
/// depth properly instead of reproducing that narrower heuristic.
fn split_filters(input: &str) -> (&str, Vec<String>) {
    let mut depth: i32 = 0;
    let mut positions = Vec::new();
    let mut chars = input.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '|' if depth == 0 => positions.push(idx),
            _ => {}
        }
    }
    if positions.is_empty() {
        return (input, Vec::new());
    }
    let mut segments = Vec::new();
    let mut start = 0;
    for p in positions {
        segments.push(&input[start..p]);
        start = p + 1;
    }
    segments.push(&input[start..]);
    let body = segments[0];
    let filters = segments[1..]
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (body, filters)
}

fn parse_sibling(ctx: &ParseCtx, cursor: &mut Cursor) -> Result<Expr, ExpandError> {
    let mut left = parse_chain(ctx, cursor)?;
    while cursor.eat_char('+') {
        let right = parse_chain(ctx, cursor)?;
        left = Expr::Sibling {
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_chain(ctx: &ParseCtx, cursor: &mut Cursor) -> Result<Expr, ExpandError> {
    let primary = parse_primary(ctx, cursor)?;
    let count = try_parse_multiplier_count(cursor)?;

    if cursor.eat_char('>') {
        let child = parse_chain(ctx, cursor)?;
        Ok(match count {
            Some(n) => Expr::List(
                (0..n)
                    .map(|i| {
                        let p = clone_with_numbering(&primary, i, n);
                        let c = clone_with_numbering(&child, i, n);
                        attach_child(p, c)
                    })
                    .collect(),
            ),
            None => attach_child(primary, child),
        })
    } else {
        Ok(match count {
            Some(n) => {
                Expr::List((0..n).map(|i| clone_with_numbering(&primary, i, n)).collect())
            }
            None => primary,
        })
    }
}

static MULT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*([0-9]+)").unwrap());

fn try_parse_multiplier_count(cursor: &mut Cursor) -> Result<Option<usize>, ExpandError> {
    match cursor.captures(&MULT_RE) {
        Some(caps) => {
            let n = caps[1]
                .parse::<usize>()
                .map_err(|_| ExpandError::parse_at("invalid multiplier count", cursor.pos()))?;
            Ok(Some(n))
        }
        None => Ok(None),
    }
}

fn parse_primary(ctx: &ParseCtx, cursor: &mut Cursor) -> Result<Expr, ExpandError> {
    if cursor.eat_char('(') {
        let inner = parse_sibling(ctx, cursor)?;
        if !cursor.eat_char(')') {
            return Err(ExpandError::parse_at("expected ')'", cursor.pos()));
        }
        Ok(inner)
    } else if cursor.peek() == Some('{') {
        // Bare `{text}` with no tag prefix is the grammar's `text`
        // alternative, not an implicit `div` -- `p>{item $$}` attaches the
        // text directly (see `attach_child`), not wrapped in a tag.
        let text = parse_braced_text(cursor)?;
        Ok(Expr::Text(TextContent::Literal(text)))
    } else {
        parse_tag(ctx, cursor)
    }
}

static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z!][A-Za-z0-9:!$@-]*").unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([A-Za-z0-9_\-$@]+)").unwrap());
static CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.([A-Za-z0-9_\-$@]+)").unwrap());
static LOREM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:lorem|ipsum)([0-9]*)$").unwrap());

fn parse_tag(ctx: &ParseCtx, cursor: &mut Cursor) -> Result<Expr, ExpandError> {
    let name = match cursor.matches(&TAG_NAME_RE) {
        Some(m) => m.as_str().to_string(),
        None if matches!(cursor.peek(), Some('#') | Some('.') | Some('[')) => "div".to_string(),
        None => return Err(ExpandError::parse_at("expected a tag name", cursor.pos())),
    };

    // Trailing-`+` alias special case: `ul+` → `ul>li`, looked up as a
    // whole key before `+` is given its usual sibling-operator meaning.
    if cursor.peek() == Some('+') {
        let plus_key = format!("{name}+");
        if let Some(expanded) = resolve_alias(ctx, &plus_key)? {
            cursor.advance(1);
            return Ok(expanded);
        }
    }

    let mut has_body = false;
    let mut id = None;
    let mut classes = Vec::new();
    let mut props = Vec::new();
    let mut text = None;

    if let Some(caps) = cursor.captures(&ID_RE) {
        id = Some(TextPart::parse(&caps[1]));
        has_body = true;
    }
    while let Some(caps) = cursor.captures(&CLASS_RE) {
        classes.push(TextPart::parse(&caps[1]));
        has_body = true;
    }
    if cursor.peek() == Some('[') {
        props = parse_attrs(cursor)?;
        has_body = true;
    }
    if cursor.peek() == Some('{') {
        text = Some(parse_braced_text(cursor)?);
        has_body = true;
    }

    if let Some(caps) = LOREM_RE.captures(&name) {
        let n = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(crate::lorem::DEFAULT_WORD_COUNT);

        if !has_body {
            return Ok(Expr::Text(TextContent::Lorem(n)));
        }
        let mut div = TagNode::bare(TextPart::Plain("div".to_string()));
        div.has_body = true;
        div.id = id;
        div.classes = classes;
        div.props = props;
        div.text = text;
        div.children = Some(Box::new(Expr::Text(TextContent::Lorem(n))));
        return Ok(Expr::Tag(div));
    }

    if let Some(mut expanded) = resolve_alias(ctx, &name)? {
        merge_onto_first_tag(&mut expanded, id, classes, props, text);
        return Ok(expanded);
    }

    Ok(Expr::Tag(TagNode {
        name: TextPart::parse(&name),
        has_body,
        id,
        classes,
        props,
        text,
        children: None,
    }))
}

/// Resolve an alias by name, parsing and caching its expansion on first use
/// (spec §4.3). Returns `Ok(None)` when `key` is not an alias at all.
fn resolve_alias(ctx: &ParseCtx, key: &str) -> Result<Option<Expr>, ExpandError> {
    if let Some(cached) = ctx.tables.html.cached_alias_ast(key) {
        trace!("alias cache hit for '{key}'");
        return Ok(Some(cached));
    }
    let Some(raw) = ctx.tables.html.alias_raw(key) else {
        return Ok(None);
    };
    trace!("resolving alias '{key}' -> {raw}");
    let raw = raw.to_string();
    let mut cursor = Cursor::new(&raw);
    let mut expr = parse_sibling(ctx, &mut cursor)?;
    resolve_numbering(&mut expr, 0, 1);
    ctx.tables.html.cache_alias_ast(key, expr.clone());
    Ok(Some(expr))
}

static ATTR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-z_:][A-Za-z0-9_:.-]*"#).unwrap());
static BARE_VALUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s\]]+").unwrap());

fn parse_attrs(cursor: &mut Cursor) -> Result<Vec<(String, TextPart, bool)>, ExpandError> {
    cursor.eat_char('[');
    let mut attrs = Vec::new();
    skip_spaces(cursor);
    while cursor.peek() != Some(']') {
        if cursor.is_empty() {
            return Err(ExpandError::parse_at("unterminated attribute list", cursor.pos()));
        }
        let name = cursor.expect(&ATTR_NAME_RE, "attribute name")?.as_str().to_string();
        skip_spaces(cursor);
        let (value, is_expr) = if cursor.eat_char('=') {
            skip_spaces(cursor);
            match cursor.peek() {
                Some('"') | Some('\'') => (parse_quoted(cursor)?, false),
                Some('{') => (parse_braced_text(cursor)?, true),
                _ => (
                    TextPart::parse(cursor.expect(&BARE_VALUE_RE, "attribute value")?.as_str()),
                    false,
                ),
            }
        } else {
            (TextPart::Plain(String::new()), false)
        };
        attrs.push((name, value, is_expr));
        skip_spaces(cursor);
    }
    cursor.eat_char(']');
    Ok(attrs)
}

fn skip_spaces(cursor: &mut Cursor) {
    while cursor.peek() == Some(' ') {
        cursor.advance(1);
    }
}

fn parse_quoted(cursor: &mut Cursor) -> Result<TextPart, ExpandError> {
    let quote = cursor.peek().expect("caller checked for a quote");
    cursor.advance(quote.len_utf8());
    let mut content = String::new();
    loop {
        match cursor.peek() {
            None => {
                return Err(ExpandError::parse_at("unterminated quoted value", cursor.pos()))
            }
            Some(c) if c == quote => {
                cursor.advance(c.len_utf8());
                break;
            }
            Some('\\') => {
                cursor.advance(1);
                if let Some(c2) = cursor.peek() {
                    content.push(c2);
                    cursor.advance(c2.len_utf8());
                }
            }
            Some(c) => {
                content.push(c);
                cursor.advance(c.len_utf8());
            }
        }
    }
    Ok(TextPart::parse(&content))
}

/// Parse a `{...}` text span, tracking nested braces and unescaping
/// everything except `\$`, which [`crate::numbering::split`] must still see
/// so it can treat it as a literal dollar sign rather than a directive.
fn parse_braced_text(cursor: &mut Cursor) -> Result<TextPart, ExpandError> {
    cursor.eat_char('{');
    let mut depth = 1;
    let mut raw = String::new();
    loop {
        match cursor.peek() {
            None => return Err(ExpandError::parse_at("unterminated text", cursor.pos())),
            Some('\\') => {
                raw.push('\\');
                cursor.advance(1);
                if let Some(c2) = cursor.peek() {
                    raw.push(c2);
                    cursor.advance(c2.len_utf8());
                }
            }
            Some('{') => {
                depth += 1;
                raw.push('{');
                cursor.advance(1);
            }
            Some('}') => {
                depth -= 1;
                cursor.advance(1);
                if depth == 0 {
                    break;
                }
                raw.push('}');
            }
            Some(c) => {
                raw.push(c);
                cursor.advance(c.len_utf8());
            }
        }
    }
    Ok(TextPart::parse(&unescape_braces(&raw)))
}

fn unescape_braces(input: &str) -> String {
    let mut out = String::new();
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                out.push('\\');
                out.push('$');
                chars.next();
            }
            Some(&next) => {
                out.push(next);
                chars.next();
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Tables;

    fn tables() -> Tables {
        Tables::embedded()
    }

    #[test]
    fn split_filters_recovers_every_primary_in_a_chain() {
        let (body, filters) = split_filters("p{hi}|haml|html");
        assert_eq!(body, "p{hi}");
        assert_eq!(filters, vec!["haml".to_string(), "html".to_string()]);
    }

    #[test]
    fn split_filters_ignores_pipe_inside_braced_text() {
        let (body, filters) = split_filters("p{a|b}|e");
        assert_eq!(body, "p{a|b}");
        assert_eq!(filters, vec!["e".to_string()]);
    }

    #[test]
    fn plain_tag_parses() {
        let t = tables();
        let expr = parse("div", &t).unwrap();
        assert!(matches!(expr, Expr::Tag(ref tag) if tag.name == TextPart::Plain("div".into())));
    }

    #[test]
    fn child_operator_builds_parent_child() {
        let t = tables();
        let expr = parse("ul>li", &t).unwrap();
        match expr {
            Expr::ParentChild { parent, child } => {
                assert!(matches!(*parent, Expr::Tag(ref tag) if tag.name == TextPart::Plain("ul".into())));
                assert!(matches!(*child, Expr::Tag(ref tag) if tag.name == TextPart::Plain("li".into())));
            }
            other => panic!("expected parent-child, got {other:?}"),
        }
    }

    #[test]
    fn multiplier_with_child_distributes_to_each_clone() {
        let t = tables();
        let expr = parse("li*2>span", &t).unwrap();
        match expr {
            Expr::List(items) => {
                assert_eq!(items.len(), 2);
                for item in items {
                    assert!(matches!(item, Expr::ParentChild { .. }));
                }
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn bare_braced_child_collapses_onto_tag_text() {
        let t = tables();
        let expr = parse("p*3>{item $$}", &t).unwrap();
        match expr {
            Expr::List(items) => {
                assert_eq!(items.len(), 3);
                let rendered: Vec<String> = items
                    .into_iter()
                    .map(|item| match item {
                        Expr::Tag(tag) => tag.text.unwrap().instantiate(0, 1),
                        other => panic!("expected tag, got {other:?}"),
                    })
                    .collect();
                assert_eq!(rendered, vec!["item 01", "item 02", "item 03"]);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn sibling_operator_builds_sibling() {
        let t = tables();
        let expr = parse("p+p", &t).unwrap();
        assert!(matches!(expr, Expr::Sibling { .. }));
    }

    #[test]
    fn bare_lorem_becomes_text_node() {
        let t = tables();
        let expr = parse("lorem5", &t).unwrap();
        assert!(matches!(expr, Expr::Text(TextContent::Lorem(5))));
    }

    #[test]
    fn lorem_with_class_wraps_in_div() {
        let t = tables();
        let expr = parse("lorem3.foo", &t).unwrap();
        match expr {
            Expr::Tag(tag) => {
                assert_eq!(tag.name, TextPart::Plain("div".into()));
                assert_eq!(tag.classes, vec![TextPart::Plain("foo".into())]);
                assert!(matches!(tag.children.as_deref(), Some(Expr::Text(TextContent::Lorem(3)))));
            }
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn alias_merges_caller_classes() {
        let t = tables();
        let expr = parse("bq.intro", &t).unwrap();
        match expr {
            Expr::Tag(tag) => {
                assert_eq!(tag.name, TextPart::Plain("blockquote".into()));
                assert_eq!(tag.classes, vec![TextPart::Plain("intro".into())]);
            }
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn trailing_plus_alias_expands_table() {
        let t = tables();
        let expr = parse("table+", &t).unwrap();
        // table>tr>td
        match expr {
            Expr::ParentChild { parent, child } => {
                assert!(matches!(*parent, Expr::Tag(ref tag) if tag.name == TextPart::Plain("table".into())));
                assert!(matches!(*child, Expr::ParentChild { .. }));
            }
            other => panic!("expected parent-child, got {other:?}"),
        }
    }

    #[test]
    fn group_then_child_attaches_to_innermost() {
        let t = tables();
        let expr = parse("table+>em", &t).unwrap();
        match expr {
            Expr::ParentChild { child, .. } => match *child {
                Expr::ParentChild { child, .. } => match *child {
                    Expr::ParentChild { child, .. } => {
                        assert!(matches!(*child, Expr::Tag(ref tag) if tag.name == TextPart::Plain("em".into())));
                    }
                    other => panic!("expected nested parent-child, got {other:?}"),
                },
                other => panic!("expected nested parent-child, got {other:?}"),
            },
            other => panic!("expected parent-child, got {other:?}"),
        }
    }

    #[test]
    fn attribute_with_quoted_value() {
        let t = tables();
        let expr = parse(r#"a[href="/x"]"#, &t).unwrap();
        match expr {
            Expr::Tag(tag) => {
                assert_eq!(tag.props, vec![("href".to_string(), TextPart::Plain("/x".into()), false)]);
            }
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn braced_text_preserves_escaped_dollar() {
        let t = tables();
        let expr = parse(r"span{\$5}", &t).unwrap();
        match expr {
            Expr::Tag(tag) => {
                assert_eq!(tag.text, Some(TextPart::Plain("$5".to_string())));
            }
            other => panic!("expected tag, got {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_is_a_parse_error() {
        let t = tables();
        assert!(parse("div)", &t).is_err());
    }
}
