//! Named HTML entities for XHTML parsing.
//!
//! XHTML host pages may use HTML named entities (`&nbsp;`, `&para;`) that an
//! XML reader does not know. They are replaced with their characters before
//! parsing; the five XML entities are left for the reader.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

/// Replace known HTML named entities with their characters.
pub(crate) fn convert_html_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            entity_to_unicode(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}

fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "times" => "\u{00d7}",
        "deg" => "\u{00b0}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_named_entities() {
        assert_eq!(convert_html_entities("a&nbsp;b&para;"), "a\u{00a0}b\u{00b6}");
    }

    #[test]
    fn test_keeps_xml_entities() {
        assert_eq!(
            convert_html_entities("&lt;&amp;&gt;&quot;&apos;"),
            "&lt;&amp;&gt;&quot;&apos;"
        );
    }

    #[test]
    fn test_keeps_numeric_references() {
        assert_eq!(convert_html_entities("&#182;&#xB6;"), "&#182;&#xB6;");
    }
}
