//! Filter-chain resolution (spec §4.5, §6): picking the primary tag-maker
//! and whether the `e` escape post-filter is active. Unknown filter names
//! are ignored rather than rejected — the engine only errors on malformed
//! abbreviations, never on an unrecognised decoration.

use crate::options::Options;

/// Which tag-maker renders the primary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMakerKind {
    Html,
    Commented,
    Haml,
    Hiccup,
}

/// The outcome of resolving a filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub maker: TagMakerKind,
    pub escape: bool,
}

/// Resolve `explicit` (the abbreviation's own `|`-separated filters) against
/// `options`. When `explicit` is empty, `options.fallback_filter` supplies
/// the default chain (spec §6; extension-based defaults via
/// `default_filter_by_ext` are a config surface for embedders that have an
/// associated file extension — this crate's `expand` has none, so it is not
/// consulted here).
///
/// When more than one primary-format filter appears, the last one wins —
/// each overwrites the previous choice as the chain is walked left to right.
pub fn resolve(explicit: &[String], options: &Options) -> ResolvedFilters {
    let chain: &[String] = if explicit.is_empty() {
        &options.fallback_filter
    } else {
        explicit
    };

    let mut maker = TagMakerKind::Html;
    let mut escape = false;
    for name in chain {
        match name.as_str() {
            "html" => maker = TagMakerKind::Html,
            "haml" => maker = TagMakerKind::Haml,
            "hic" | "hiccup" => maker = TagMakerKind::Hiccup,
            "c" | "comment" => maker = TagMakerKind::Commented,
            "e" | "escape" => escape = true,
            _ => {}
        }
    }
    ResolvedFilters { maker, escape }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_html_with_no_filters() {
        let options = Options::default();
        let resolved = resolve(&[], &options);
        assert_eq!(resolved.maker, TagMakerKind::Html);
        assert!(!resolved.escape);
    }

    #[test]
    fn last_primary_filter_wins() {
        let options = Options::default();
        let chain = vec!["haml".to_string(), "html".to_string()];
        assert_eq!(resolve(&chain, &options).maker, TagMakerKind::Html);
    }

    #[test]
    fn unknown_filters_are_ignored() {
        let options = Options::default();
        let chain = vec!["bogus".to_string(), "haml".to_string()];
        assert_eq!(resolve(&chain, &options).maker, TagMakerKind::Haml);
    }

    #[test]
    fn escape_filter_is_independent_of_primary_choice() {
        let options = Options::default();
        let chain = vec!["haml".to_string(), "e".to_string()];
        let resolved = resolve(&chain, &options);
        assert_eq!(resolved.maker, TagMakerKind::Haml);
        assert!(resolved.escape);
    }
}
