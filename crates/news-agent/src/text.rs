//! Plain-text extraction from feed markup

use once_cell::sync::Lazy;
use regex::Regex;

static TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)</?[a-z!][^>]*>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Reduce an HTML fragment to plain text
///
/// Strips tags, decodes entities and collapses runs of whitespace.
pub fn clean_html(raw: &str) -> String {
    // double-escaped markup: unescape once so the tags become strippable
    let unescaped = if raw.contains("&lt;") {
        html_escape::decode_html_entities(raw).to_string()
    } else {
        raw.to_string()
    };

    let stripped = TAGS.replace_all(&unescaped, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        assert_eq!(
            clean_html("<p>Bitcoin <b>rallies</b> past $70k</p>"),
            "Bitcoin rallies past $70k"
        );
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(clean_html("S&amp;P&nbsp;500 &quot;risk-on&quot;"), "S&P 500 \"risk-on\"");
    }

    #[test]
    fn test_escaped_markup() {
        let raw = r##"&lt;a href="https://example.com/a"&gt;ETF approved&lt;/a&gt;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;"##;
        assert_eq!(clean_html(raw), "ETF approved Reuters");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_html("  line one\n\n\tline   two  "), "line one line two");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_html("BTC < ETH > SOL"), "BTC < ETH > SOL");
        assert_eq!(clean_html(""), "");
    }
}
