//! Shared text normalization for feed and API payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const ELLIPSIS: &str = "...";

/// Named entities that show up in feed HTML but are not part of XML's
/// predefined set, so `quick_xml::escape::unescape` would reject them.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&hellip;", "\u{2026}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201c}"),
    ("&rdquo;", "\u{201d}"),
];

/// Strip tags, decode entities, collapse whitespace, and cap the length.
pub(crate) fn clean_summary(raw: &str, max_chars: usize) -> String {
    truncate_chars(&strip_html(raw), max_chars)
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Keep words from adjacent block elements apart.
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut replaced = text.to_string();
    for (entity, value) in HTML_ENTITIES {
        replaced = replaced.replace(entity, value);
    }
    match quick_xml::escape::unescape(&replaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => replaced,
    }
}

/// Truncate to at most `max_chars` characters, ending in `...` when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}

/// Parse a publication timestamp in any of the formats feeds commonly use.
///
/// Returns `None` for unparsable input; callers treat that as "unknown",
/// which sorts after every known date.
pub(crate) fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn strip_html_removes_tags_and_collapses_whitespace() {
        let html = "<p>Markets <b>rallied</b>\n\n today.</p><p>More inside</p>";
        assert_eq!(strip_html(html), "Markets rallied today. More inside");
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(
            strip_html("Fish &amp; chips&nbsp;&mdash; a &quot;classic&quot;"),
            "Fish & chips \u{2014} a \"classic\""
        );
    }

    #[test]
    fn strip_html_keeps_text_with_unknown_entities() {
        assert_eq!(strip_html("caf&eacute; opens"), "caf&eacute; opens");
    }

    #[test]
    fn truncate_chars_respects_cap_and_char_boundaries() {
        let text = "é".repeat(600);
        let out = truncate_chars(&text, 500);
        assert_eq!(out.chars().count(), 500);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncate_chars_leaves_short_text_alone() {
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn parse_published_accepts_rfc3339_and_rfc2822() {
        let a = parse_published("2025-03-01T12:30:00Z").unwrap();
        assert_eq!((a.year(), a.month(), a.day(), a.hour()), (2025, 3, 1, 12));

        let b = parse_published("Sat, 01 Mar 2025 12:30:00 +0100").unwrap();
        assert_eq!(b.hour(), 11);
    }

    #[test]
    fn parse_published_accepts_naive_formats() {
        assert!(parse_published("2025-03-01 08:00:00").is_some());
        assert!(parse_published("2025-03-01").is_some());
    }

    #[test]
    fn parse_published_returns_none_for_garbage() {
        assert_eq!(parse_published("yesterday-ish"), None);
        assert_eq!(parse_published(""), None);
    }
}
