use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a stored record date into its calendar day.
/// The day is taken as written: offsets and times never move it to another day.
/// Spellings chrono does not know fall back to dateparser, read as UTC
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    // ISO 8601 / RFC 3339 with an offset (e.g. "2025-12-16T01:00:00+05:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    // RFC 2822 (e.g. "Tue, 16 Dec 2025 01:00:00 +0500")
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }

    // Date-time without an offset, "T" or space separated
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive_dt.date());
        }
    }

    // Leading "YYYY-MM-DD" followed by anything else
    if let Ok((date, _)) = NaiveDate::parse_and_remainder(raw, "%Y-%m-%d") {
        return Some(date);
    }

    dateparser::parse_with_timezone(raw, &Utc)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Simplifies a raw boolean query for display
/// `"Russian Navy" OR "VMF"` becomes `Russian Navy/VMF`
pub fn topic_label(raw: &str) -> String {
    raw.replace(" OR ", "/").replace('"', "")
}

/// Builds a short link title from a record's display text.
/// The cut is by characters and the ellipsis is always appended, even when nothing was cut.
pub fn display_title(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace(" - Twitter", "").replace("Twitter", "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut title: String = collapsed.chars().take(max_chars).collect();
    title.push_str("...");
    title
}

/// Escapes characters that would break a markdown table row or the link text inside it
pub fn escape_table_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '|' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
