//! CSS value parsing: numbers+units, colors, and the vendor-prefix spec
//! (spec §4.7 step 2).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::ColorCase;
use crate::tables::CssPreferences;

/// One argument of a CSS subexpression, after type detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssArg {
    /// A number with the unit it will render with (possibly dropped for
    /// unitless properties at render time).
    Number { value: String, unit: String },
    /// An already fully-rendered color literal (`#rrggbb` or `rgb(r,g,b)`).
    Color(String),
    /// Anything else: a keyword (alias-expanded) or a raw token.
    Raw(String),
}

/// Which vendor-prefixed copies of a declaration to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorSpec {
    /// No leading `-`: no vendor-prefixed copies.
    None,
    /// A lone leading `-`: use the property's configured prefix list.
    Auto,
    /// `-wmso-`-style explicit subset, in the order given.
    Explicit(Vec<char>),
}

/// Parse a leading vendor-prefix spec from `s`, returning the spec and the
/// unconsumed remainder.
pub fn parse_vendor_spec(s: &str) -> (VendorSpec, &str) {
    if !s.starts_with('-') {
        return (VendorSpec::None, s);
    }
    let rest = &s[1..];
    let mut letters = Vec::new();
    let mut consumed = 0;
    for c in rest.chars() {
        if "wmso".contains(c) {
            letters.push(c);
            consumed += c.len_utf8();
        } else {
            break;
        }
    }
    if !letters.is_empty() && rest[consumed..].starts_with('-') {
        return (VendorSpec::Explicit(letters), &rest[consumed + 1..]);
    }
    if letters.is_empty() {
        return (VendorSpec::Auto, rest);
    }
    // Letters were found but no closing '-': not a valid explicit spec.
    (VendorSpec::None, s)
}

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9.]+").unwrap());
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{1,6}").unwrap());

/// Try to parse a leading number (with optional unit-alias letter) from `s`.
pub fn try_number<'a>(s: &'a str, prefs: &CssPreferences) -> Option<(CssArg, &'a str)> {
    let m = NUMBER_RE.find(s)?;
    let value = m.as_str().to_string();
    let rest = &s[m.end()..];

    let mut unit = None;
    let mut rest2 = rest;
    if let Some(c) = rest.chars().next() {
        if let Some(mapped) = prefs.unit_aliases.get(&c.to_string()) {
            unit = Some(mapped.clone());
            rest2 = &rest[c.len_utf8()..];
        }
    }
    let unit = unit.unwrap_or_else(|| {
        if value.contains('.') {
            prefs.float_unit.clone()
        } else {
            prefs.int_unit.clone()
        }
    });
    Some((CssArg::Number { value, unit }, rest2))
}

/// Try to parse a leading color (and its optional `rgb`/trailing-keyword
/// decorations) from `s`. May yield a second [`CssArg::Raw`] for the
/// trailing keyword letter (e.g. `s` in `#000s` → `solid`).
pub fn try_color<'a>(
    s: &'a str,
    prefs: &CssPreferences,
    case: ColorCase,
    shorten: bool,
) -> Option<(Vec<CssArg>, &'a str)> {
    let m = HEX_RE.find(s)?;
    let hex_raw = &m.as_str()[1..];
    let mut rest = &s[m.end()..];

    let normalized = normalize_hex(hex_raw);

    let mut is_rgb = false;
    if let Some(r) = rest.strip_prefix("rgb") {
        is_rgb = true;
        rest = r;
    }

    let mut trailing = None;
    if let Some(c) = rest.chars().next() {
        if c.is_ascii_alphabetic() {
            if let Some(full) = prefs.keyword_aliases.get(&c.to_string()) {
                trailing = Some(full.clone());
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    let color_str = if is_rgb {
        render_rgb(&normalized)
    } else {
        render_hex(&normalized, case, shorten)
    };

    let mut out = vec![CssArg::Color(color_str)];
    if let Some(kw) = trailing {
        out.push(CssArg::Raw(kw));
    }
    Some((out, rest))
}

/// Normalise a 1–6 char hex fragment to exactly 6 characters (spec §4.7 step 2).
pub fn normalize_hex(raw: &str) -> String {
    match raw.chars().count() {
        1 => raw.repeat(6),
        2 => raw.repeat(3),
        3 => raw.chars().flat_map(|c| [c, c]).collect(),
        n if (4..=6).contains(&n) => {
            let mut s: String = raw.chars().take(6).collect();
            while s.len() < 6 {
                s.push('0');
            }
            s
        }
        _ => raw.chars().take(6).collect(),
    }
}

fn render_hex(hex6: &str, case: ColorCase, shorten: bool) -> String {
    let cased = match case {
        ColorCase::Upper => hex6.to_uppercase(),
        ColorCase::Lower => hex6.to_lowercase(),
        ColorCase::Auto => hex6.to_string(),
    };
    let body = if shorten { try_shorten(&cased) } else { cased };
    format!("#{body}")
}

fn try_shorten(hex6: &str) -> String {
    let c: Vec<char> = hex6.chars().collect();
    if c.len() == 6 && c[0] == c[1] && c[2] == c[3] && c[4] == c[5] {
        [c[0], c[2], c[4]].iter().collect()
    } else {
        hex6.to_string()
    }
}

fn render_rgb(hex6: &str) -> String {
    let r = u8::from_str_radix(&hex6[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex6[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex6[4..6], 16).unwrap_or(0);
    format!("rgb({r},{g},{b})")
}
