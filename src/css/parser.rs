//! Token-level parsing for the CSS-like abbreviation grammar (spec §4.7):
//! split on `+`, then for each token peel off an `!important` suffix, a
//! vendor-prefix spec, a property key, and its argument list.

use crate::options::ColorCase;
use crate::tables::CssPreferences;

use super::values::{self, CssArg, VendorSpec};

/// One parsed `+`-separated piece of a CSS abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssSubExpr {
    pub key: String,
    pub vendor: VendorSpec,
    pub important: bool,
    pub args: Vec<CssArg>,
}

/// Split `input` on `+`, rejoining a piece into the previous token when it
/// looks like the continuation of an argument list rather than a new
/// property abbreviation (spec §4.7 step 1).
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for piece in input.split('+') {
        let should_merge = !tokens.is_empty() && looks_like_continuation(piece);
        if should_merge {
            let last = tokens.last_mut().expect("checked non-empty above");
            last.push('+');
            last.push_str(piece);
        } else {
            tokens.push(piece.to_string());
        }
    }
    tokens
}

fn looks_like_continuation(piece: &str) -> bool {
    let mut chars = piece.chars();
    match chars.next() {
        Some(' ') | Some('#') | Some('$') => true,
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c2| c2.is_ascii_digit()),
        _ => false,
    }
}

/// Parse one token into a [`CssSubExpr`].
pub fn parse_token(
    token: &str,
    prefs: &CssPreferences,
    color_case: ColorCase,
    color_shorten: bool,
) -> CssSubExpr {
    let trimmed = token.trim();
    let (body, important) = match trimmed.strip_suffix('!') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };
    let (vendor, rest) = values::parse_vendor_spec(body);
    let (key, args_tail) = split_key_args(rest);
    let args = parse_args(args_tail, prefs, color_case, color_shorten);
    CssSubExpr {
        key: key.to_string(),
        vendor,
        important,
        args,
    }
}

/// Split `s` into the property key and the remaining argument text, at the
/// first character that can only start an argument (space, `#`, a digit, a
/// `$` unit-alias run, or a negative-number `-`).
fn split_key_args(s: &str) -> (&str, &str) {
    for (i, c) in s.char_indices() {
        let starts_args = match c {
            ' ' | '#' | '$' => true,
            c if c.is_ascii_digit() => true,
            '-' => s[i + 1..].chars().next().is_some_and(|c2| c2.is_ascii_digit()),
            _ => false,
        };
        if starts_args {
            return (&s[..i], &s[i..]);
        }
    }
    (s, "")
}

/// Parse a whitespace/`#`/digit-delimited argument list into typed args.
pub fn parse_args(
    mut s: &str,
    prefs: &CssPreferences,
    color_case: ColorCase,
    color_shorten: bool,
) -> Vec<CssArg> {
    let mut args = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            break;
        }
        if let Some((arg, rest)) = values::try_number(s, prefs) {
            args.push(arg);
            s = rest;
            continue;
        }
        if let Some((mut color_args, rest)) = values::try_color(s, prefs, color_case, color_shorten)
        {
            args.append(&mut color_args);
            s = rest;
            continue;
        }
        let end = s.find(' ').unwrap_or(s.len());
        let (word, rest) = s.split_at(end);
        let resolved = prefs
            .keyword_aliases
            .get(word)
            .cloned()
            .unwrap_or_else(|| word.to_string());
        args.push(CssArg::Raw(resolved));
        s = rest;
    }
    args
}
