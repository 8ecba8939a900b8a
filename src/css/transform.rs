//! Snippet rendering for the CSS-like grammar: property-name resolution,
//! unit emission, excess-argument folding, `!important`, and vendor-prefix
//! line duplication (spec §4.7 steps 2–3).

use tracing::debug;

use crate::error::ExpandError;
use crate::options::Options;
use crate::tables::{CompiledTemplate, Piece, Tables};

use super::parser::{self, CssSubExpr};
use super::values::{CssArg, VendorSpec};

/// Expand a full CSS (or Sass) abbreviation to its rendered declarations.
pub fn expand(input: &str, sass: bool, tables: &Tables, options: &Options) -> Result<String, ExpandError> {
    let tokens = parser::tokenize(input);
    let mut lines = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let sub = parser::parse_token(
            token,
            &tables.css_preferences,
            options.color_case,
            options.color_shorten,
        );
        lines.push(render_subexpr(&sub, tables, sass, options)?);
    }
    Ok(lines.join("\n"))
}

fn render_subexpr(
    sub: &CssSubExpr,
    tables: &Tables,
    sass: bool,
    _options: &Options,
) -> Result<String, ExpandError> {
    let table = if sass { &tables.sass } else { &tables.css };
    let compiled = table
        .snippets
        .get_compiled(&sub.key)
        .or_else(|| tables.css.snippets.get_compiled(&sub.key));

    let (property_name, mut rendered) = match compiled {
        Some(compiled) => {
            let property_name = property_name_from_template(&compiled);
            let unitless = tables
                .css_preferences
                .unitless_properties
                .contains(&property_name);

            let strings: Vec<String> = sub.args.iter().map(|a| stringify_arg(a, unitless)).collect();
            let args = effective_args(&compiled, strings);
            (property_name, compiled.render_args(&args))
        }
        None => {
            debug!("no compiled snippet for key '{}', falling back to generic rendering", sub.key);
            let strings: Vec<String> = sub.args.iter().map(|a| stringify_arg(a, false)).collect();
            (sub.key.clone(), format!("{}: {};", sub.key, strings.join(" ")))
        }
    };
    if sub.important {
        rendered = rendered.trim_end_matches(';').to_string();
        rendered.push_str(if sass { " !important" } else { " !important;" });
    }

    let mut lines = Vec::new();
    match &sub.vendor {
        VendorSpec::None => {}
        VendorSpec::Auto => {
            let prefixes = tables
                .css_preferences
                .vendor_prefixes_properties
                .get(&property_name)
                .cloned()
                .unwrap_or_else(|| vec!["webkit".into(), "moz".into(), "ms".into(), "o".into()]);
            for prefix in prefixes {
                lines.push(vendor_prefixed_line(&rendered, &property_name, &prefix));
            }
        }
        VendorSpec::Explicit(letters) => {
            for letter in letters {
                if let Some(prefix) = prefix_for_letter(*letter) {
                    lines.push(vendor_prefixed_line(&rendered, &property_name, prefix));
                }
            }
        }
    }
    lines.push(rendered);
    Ok(lines.join("\n"))
}

fn prefix_for_letter(letter: char) -> Option<&'static str> {
    match letter {
        'w' => Some("webkit"),
        'm' => Some("moz"),
        's' => Some("ms"),
        'o' => Some("o"),
        _ => None,
    }
}

fn vendor_prefixed_line(rendered: &str, property_name: &str, prefix: &str) -> String {
    if property_name.is_empty() {
        return rendered.to_string();
    }
    rendered.replacen(property_name, &format!("-{prefix}-{property_name}"), 1)
}

/// The property name a compiled template renders, read from the text of its
/// first literal piece up to `:` (e.g. `"margin: ${1};"` → `"margin"`). This,
/// not the abbreviation key, is what vendor-prefix and unitless-property
/// lookups key on.
fn property_name_from_template(template: &CompiledTemplate) -> String {
    match template.pieces.first() {
        Some(Piece::Literal(s)) => s.split(':').next().unwrap_or("").trim().to_string(),
        _ => String::new(),
    }
}

fn stringify_arg(arg: &CssArg, unitless: bool) -> String {
    match arg {
        CssArg::Number { value, unit } => {
            if unitless {
                value.clone()
            } else {
                format!("{value}{unit}")
            }
        }
        CssArg::Color(s) => s.clone(),
        CssArg::Raw(s) => s.clone(),
    }
}

/// Fold any args beyond the template's highest referenced placeholder into
/// the last referenced slot (spec §4.7 step 3, "excess arguments").
fn effective_args(template: &CompiledTemplate, strings: Vec<String>) -> Vec<String> {
    match template.highest_index() {
        None => strings,
        Some(max_index) if strings.len() > max_index + 1 => {
            let mut out = strings[..max_index].to_vec();
            out.push(strings[max_index..].join(" "));
            out
        }
        Some(_) => strings,
    }
}
