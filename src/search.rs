//! # Web Search
//!
//! DuckDuckGo HTML scrape: fetch the result page and pull out the top hits
//! with a regex over the markup. Failures are encoded in the returned text,
//! never as `Err`, so the model reads them like any other tool output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

pub const SEARCH_TIMEOUT_SECS: u64 = 10;
const MAX_RESULTS: usize = 5;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// One result block: the `result__a` anchor (href + title) followed somewhere
/// later by its `result__snippet` anchor.
static RESULT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.+?)</a>.*?<a[^>]*class="result__snippet"[^>]*>(.+?)</a>"#,
    )
    .expect("valid regex")
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Searches DuckDuckGo and formats the top results as
/// `**title**\nurl\nsnippet` entries. `"no results found"` when the page
/// parses to nothing, `"search error: ..."` when the request itself fails.
pub async fn web_search(query: &str) -> String {
    match fetch_results_page(query).await {
        Ok(html) => {
            let results = parse_results(&html);
            if results.is_empty() {
                "no results found".to_string()
            } else {
                results.join("\n")
            }
        }
        Err(e) => format!("search error: {e}"),
    }
}

async fn fetch_results_page(query: &str) -> reqwest::Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
        .build()?;
    client
        .get("https://html.duckduckgo.com/html/")
        .query(&[("q", query)])
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

fn parse_results(html: &str) -> Vec<String> {
    RESULT_RE
        .captures_iter(html)
        .take(MAX_RESULTS)
        .map(|caps| {
            let url = resolve_redirect(&caps[1]);
            let title = strip_tags(&caps[2]);
            let snippet = strip_tags(&caps[3]);
            format!("**{title}**\n{url}\n{snippet}\n")
        })
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "").trim().to_string()
}

/// DuckDuckGo wraps outbound links in a redirect carrying the target in the
/// percent-encoded `uddg` parameter; unwrap it when present.
fn resolve_redirect(url: &str) -> String {
    let Some((_, tail)) = url.split_once("uddg=") else {
        return url.to_string();
    };
    let target = tail.split('&').next().unwrap_or(tail);
    match urlencoding::decode(target) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => url.to_string(),
    }
}
