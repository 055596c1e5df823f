//! Personal-website fetcher.
//!
//! Fetches the page, strips markup down to visible text, and pulls two
//! light signals out of it: a probable owner name (title/heading) and
//! capitalized multi-word phrases that look like organization names.
//! Fetch failures are soft: they land in `WebsiteData::error` so the
//! evaluation context simply ends up thinner.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::domain::models::WebsiteData;
use crate::domain::ports::{SourceError, WebsiteSource};

/// Visible text kept per page.
const MAX_TEXT_CHARS: usize = 3_000;
/// Organization-name candidates kept per page.
const MAX_COMPANIES: usize = 20;

/// Words that never form an organization name on their own.
const STOP_WORDS: &[&str] = &[
    "The", "This", "These", "Those", "What", "Where", "When", "How", "About", "Contact", "Home",
    "Blog", "Work", "My", "Our", "We", "You", "He", "She", "They", "It", "Its", "And", "For",
    "With", "From", "Into", "Over", "Under", "Through", "Between", "During",
];

pub struct HttpWebsiteSource {
    http: ReqwestClient,
}

impl HttpWebsiteSource {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; sift-pipeline)")
            .build()
            .context("failed to build website HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl WebsiteSource for HttpWebsiteSource {
    async fn fetch(&self, url: &str) -> Result<WebsiteData, SourceError> {
        if !url.starts_with("http") {
            return Ok(WebsiteData { error: Some("invalid URL".into()), ..Default::default() });
        }

        debug!(url, "fetching personal website");
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                return Ok(WebsiteData { error: Some("timeout".into()), ..Default::default() });
            }
            Err(err) if err.is_connect() => {
                return Ok(WebsiteData {
                    error: Some("connection error".into()),
                    ..Default::default()
                });
            }
            Err(err) => {
                return Ok(WebsiteData { error: Some(err.to_string()), ..Default::default() });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(WebsiteData {
                error: Some(format!("HTTP {}", status.as_u16())),
                ..Default::default()
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| SourceError::Malformed(err.to_string()))?;

        let name = extract_title(&body);
        let text = visible_text(&body);
        let companies = extract_companies(&text);
        Ok(WebsiteData {
            name,
            companies,
            raw_text: truncate_chars(&text, MAX_TEXT_CHARS),
            error: None,
        })
    }
}

/// Strip markup down to visible text: tags removed, script and style
/// bodies skipped, whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];

        let lower = rest.to_ascii_lowercase();
        let skip_to = if lower.starts_with("<script") {
            lower.find("</script>").map(|end| end + "</script>".len())
        } else if lower.starts_with("<style") {
            lower.find("</style>").map(|end| end + "</style>".len())
        } else {
            rest.find('>').map(|end| end + 1)
        };

        match skip_to {
            Some(end) if end <= rest.len() => {
                out.push(' ');
                rest = &rest[end..];
            }
            _ => {
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Owner name from the first `<h1>` or the `<title>`, with trailing
/// "| Portfolio"-style suffixes dropped.
fn extract_title(html: &str) -> Option<String> {
    for tag in ["h1", "title"] {
        if let Some(content) = tag_content(html, tag) {
            let content = content
                .split(['|', '-', '\u{2013}', '\u{2014}'])
                .next()
                .unwrap_or("")
                .trim();
            let content = visible_text(content);
            if !content.is_empty() && content.len() < 60 {
                return Some(content);
            }
        }
    }
    None
}

fn tag_content<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find(&format!("<{tag}"))?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find(&format!("</{tag}"))?;
    Some(&html[content_start..content_end])
}

/// Capitalized 2-4 word runs, deduplicated, minus pure stop-word
/// phrases. Deliberately naive; these are hints for the scoring
/// context, not extraction ground truth.
fn extract_companies(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut results: Vec<String> = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let mut run = 0;
        while i + run < words.len() && is_capitalized(words[i + run]) {
            run += 1;
        }
        if run >= 2 {
            let phrase = words[i..i + run.min(4)].join(" ");
            let all_stop = phrase.split(' ').all(|word| STOP_WORDS.contains(&word));
            if !all_stop && !results.contains(&phrase) {
                results.push(phrase);
                if results.len() >= MAX_COMPANIES {
                    break;
                }
            }
        }
        i += run.max(1);
    }
    results
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(char::is_alphanumeric),
        _ => false,
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
