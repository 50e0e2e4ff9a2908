//! Rich-text content helpers
//!
//! Cell content is stored as opaque markup. These helpers only derive a plain-text view
//! of it for terminals and emptiness checks; they never rewrite the stored markup.

use lazy_regex::regex;

/// Strip markup from rich-text content
///
/// Line-breaking elements (`<br>`, closing `</p>`, `</div>`, `</li>`) become newlines,
/// other tags are dropped and the common HTML entities are decoded.
pub fn plain_text(markup: &str) -> String {
    let breaks = regex!(r"(?i)<br\s*/?>|</(?:p|div|li)\s*>");
    let tags = regex!(r"<[^>]*>");

    let text = breaks.replace_all(markup, "\n");
    let text = tags.replace_all(&text, "");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.trim_end_matches('\n').to_string()
}

/// Whether content has no visible text
///
/// Editors leave behind markup such as `<br>` or `<div></div>` in cleared cells.
pub fn is_blank(markup: &str) -> bool {
    plain_text(markup).trim().is_empty()
}
