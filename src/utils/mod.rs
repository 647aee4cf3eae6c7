use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<OffsetDateTime>) -> String {
    modified
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .map(|s| format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn last_modified_formats_rfc3339() {
        let dt = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(
            last_modified_html(Some(dt)),
            "<p class=\"meta\">Last modified: 1970-01-01T00:00:00Z</p>"
        );
        assert_eq!(last_modified_html(None), "");
    }
}
