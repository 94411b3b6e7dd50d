use chrono::NaiveDate;
use monitor_core::domain::Record;
use monitor_core::ports::ResultExtractor;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

const POST_HOSTS: [&str; 2] = ["twitter.com", "x.com"];
/// Path segment that marks an individual post rather than a profile or search page
const POST_MARKER: &str = "/status/";
/// Query parameters a result page uses to wrap the real target
const REDIRECT_PARAMS: [&str; 2] = ["q", "url"];

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

// Everything after the numeric id (tracking params, /photo/1, ?s=20) is left out
static POST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?(?:twitter|x)\.com/(?:i/web|[A-Za-z0-9_]+)/status/[0-9]+")
        .expect("valid post url pattern")
});

static REDIRECT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://www.google.com/").expect("valid redirect base"));

/// Pulls post links out of a search result page.
///
/// Anchors are kept in page order; the first `max_results` qualifying ones win.
/// An anchor that looks like a post link but has no clean post URL is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorExtractor;

impl AnchorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ResultExtractor for AnchorExtractor {
    fn extract(
        &self,
        markup: &str,
        topic: &str,
        date: NaiveDate,
        max_results: usize,
    ) -> Vec<Record> {
        let document = Html::parse_document(markup);

        document
            .select(&ANCHOR)
            .filter_map(|element| {
                let href = element.value().attr("href")?.trim();
                let url = clean_post_url(href)?;
                let text = anchor_text(&element).unwrap_or_else(|| url.clone());
                Some(Record::new(url, text, topic.to_string(), date))
            })
            .take(max_results)
            .collect()
    }
}

fn is_post_link(candidate: &str) -> bool {
    POST_HOSTS.iter().any(|host| candidate.contains(host)) && candidate.contains(POST_MARKER)
}

/// Returns the canonical post URL for an href, looking through result-page redirects.
fn clean_post_url(href: &str) -> Option<String> {
    let unwrapped = redirect_target(href);

    let cleaned = [unwrapped.as_deref(), Some(href)]
        .into_iter()
        .flatten()
        .filter(|candidate| is_post_link(candidate))
        .find_map(|candidate| POST_URL.find(candidate))
        .map(|found| found.as_str().to_string());
    cleaned
}

/// Decoded target of a `/url?q=...` style link, if the href is one.
fn redirect_target(href: &str) -> Option<String> {
    let resolved = REDIRECT_BASE.join(href).ok()?;
    resolved
        .query_pairs()
        .find(|(name, _)| REDIRECT_PARAMS.contains(&&**name))
        .map(|(_, value)| value.into_owned())
}

/// Visible text of an anchor with whitespace collapsed
fn anchor_text(element: &ElementRef) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "\"Russian Navy\" OR \"VMF\"";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()
    }

    fn extract(markup: &str, max_results: usize) -> Vec<Record> {
        AnchorExtractor::new().extract(markup, TOPIC, today(), max_results)
    }

    #[test]
    fn test_extract_skips_profile_links() {
        let markup = r#"
            <html><body>
              <a href="https://twitter.com/user/status/123">Frigate spotted</a>
              <a href="https://x.com/user2/status/456">Submarine drills</a>
              <a href="https://twitter.com/user3">Profile</a>
            </body></html>
        "#;

        let records = extract(markup, 5);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://twitter.com/user/status/123");
        assert_eq!(records[0].text, "Frigate spotted");
        assert_eq!(records[0].topic, TOPIC);
        assert_eq!(records[0].date, today());
        assert_eq!(records[1].url, "https://x.com/user2/status/456");
    }

    #[test]
    fn test_extract_unwraps_search_redirects() {
        let markup = r#"<a href="/url?q=https://twitter.com/navywatch/status/1789&amp;sa=U&amp;ved=2ahUKEw">
            <h3>Navy Watch on Twitter</h3></a>"#;

        let records = extract(markup, 5);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://twitter.com/navywatch/status/1789");
        assert_eq!(records[0].text, "Navy Watch on Twitter");
    }

    #[test]
    fn test_extract_unwraps_percent_encoded_redirects() {
        let markup = r#"<a href="/url?q=https%3A%2F%2Fx.com%2Ffleet%2Fstatus%2F42%3Fs%3D20&amp;sa=U">x</a>"#;

        let records = extract(markup, 5);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://x.com/fleet/status/42");
    }

    #[test]
    fn test_clean_post_url_prefers_redirect_target() {
        assert_eq!(
            clean_post_url("/url?q=https://x.com/fleet/status/42&sa=U").as_deref(),
            Some("https://x.com/fleet/status/42")
        );
        assert_eq!(
            clean_post_url("https://twitter.com/user/status/123?s=20").as_deref(),
            Some("https://twitter.com/user/status/123")
        );
        assert_eq!(clean_post_url("https://twitter.com/user3"), None);
    }

    #[test]
    fn test_extract_drops_trailing_segments() {
        let markup = r#"<a href="https://www.twitter.com/osint/status/77/photo/1?ref_src=twsrc">photo</a>"#;

        let records = extract(markup, 5);

        assert_eq!(records[0].url, "https://www.twitter.com/osint/status/77");
    }

    #[test]
    fn test_extract_accepts_web_status_links() {
        let markup = r#"<a href="https://twitter.com/i/web/status/991">thread</a>"#;

        let records = extract(markup, 5);

        assert_eq!(records[0].url, "https://twitter.com/i/web/status/991");
    }

    #[test]
    fn test_extract_falls_back_to_url_text() {
        let markup = r#"<a href="https://x.com/user/status/5">   </a><a href="https://x.com/user/status/6"><img src="a.png"></a>"#;

        let records = extract(markup, 5);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "https://x.com/user/status/5");
        assert_eq!(records[1].text, "https://x.com/user/status/6");
    }

    #[test]
    fn test_extract_collapses_whitespace_in_text() {
        let markup = "<a href=\"https://x.com/user/status/5\">\n  Pacific\n  <b>Fleet</b>  exercise </a>";

        let records = extract(markup, 5);

        assert_eq!(records[0].text, "Pacific Fleet exercise");
    }

    #[test]
    fn test_extract_skips_unmatchable_post_like_links() {
        let markup = r#"
            <a href="https://twitter.com/search?q=/status/">search</a>
            <a href="https://example.com/x.com/status/1">elsewhere</a>
            <a href="https://twitter.com/user/status/abc">no id</a>
            <a href="https://twitter.com/user/status/9">ok</a>
        "#;

        let records = extract(markup, 5);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://twitter.com/user/status/9");
    }

    #[test]
    fn test_extract_caps_in_page_order() {
        let markup = (1..=8)
            .map(|id| format!(r#"<a href="https://twitter.com/u/status/{id}">post {id}</a>"#))
            .collect::<String>();

        let records = extract(&markup, 5);

        assert_eq!(records.len(), 5);
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://twitter.com/u/status/1",
                "https://twitter.com/u/status/2",
                "https://twitter.com/u/status/3",
                "https://twitter.com/u/status/4",
                "https://twitter.com/u/status/5",
            ]
        );
    }

    #[test]
    fn test_extract_empty_markup() {
        assert!(extract("", 5).is_empty());
        assert!(extract("<html><body><p>No results</p></body></html>", 5).is_empty());
    }

    #[test]
    fn test_every_record_is_a_post_url() {
        let markup = r#"
            <a href="https://twitter.com/user3">profile</a>
            <a href="https://x.com/home">home</a>
            <a href="/search?q=navy">more</a>
            <a href="https://twitter.com/a/status/1?s=20&t=abc">one</a>
            <a href="https://mobile.twitter.com/b/status/2">two</a>
        "#;

        for record in extract(markup, 10) {
            let found = POST_URL.find(&record.url).unwrap();
            assert_eq!(found.as_str(), record.url);
        }
    }
}
