//! Best-effort email discovery on business websites.
//!
//! Given a website URL the discoverer fetches the homepage, scans the raw
//! body for email-shaped substrings, and falls back to likely contact-page
//! variants when the homepage has none. Every network failure is swallowed:
//! discovery must never abort the surrounding entry extraction.

use mapscout_core::DiscoveryConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::time::Duration;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

static EMAIL_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Paths tried, in order, when the homepage yields no matches.
const CONTACT_PATHS: &[&str] = &["/contact", "/contact-us"];

/// Scans business websites for contact email addresses.
pub struct EmailDiscoverer {
    client: reqwest::Client,
}

impl EmailDiscoverer {
    /// Build a discoverer with a bounded-timeout HTTP client.
    pub fn new(config: &DiscoveryConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Discover email addresses for a business website.
    ///
    /// Returns the deduplicated, validated addresses joined with `", "` in
    /// deterministic order, or `None` when nothing was found. An absent
    /// website input returns `None` without any network activity.
    pub async fn discover(&self, website: Option<&str>) -> Option<String> {
        let website = website?;

        let mut matches = self.scan_page(website).await;
        if matches.is_empty() {
            for candidate in contact_candidates(website) {
                matches = self.scan_page(&candidate).await;
                if !matches.is_empty() {
                    break;
                }
            }
        }

        finalize(matches)
    }

    async fn scan_page(&self, url: &str) -> Vec<String> {
        match self.fetch(url).await {
            Ok(body) => scan_emails(&body),
            Err(e) => {
                tracing::debug!(url, error = %e, "email discovery fetch failed");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// All email-shaped substrings in a page body, in document order.
fn scan_emails(text: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Contact-page variants derived from the base URL.
fn contact_candidates(base: &str) -> Vec<String> {
    let base = base.trim_end_matches('/');
    CONTACT_PATHS
        .iter()
        .map(|path| format!("{base}{path}"))
        .collect()
}

/// Dedup, re-validate each surviving candidate, and join.
///
/// Validation runs after dedup so a malformed match that happens to
/// dedup-collide is still rejected individually.
fn finalize(matches: Vec<String>) -> Option<String> {
    let candidates: BTreeSet<String> = matches.into_iter().collect();
    let survivors: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| EMAIL_EXACT.is_match(candidate))
        .collect();

    if survivors.is_empty() {
        None
    } else {
        Some(survivors.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_scan_emails() {
        let body = "reach us at info@example.com or sales@example.com, not admin@localhost";
        let found = scan_emails(body);
        assert_eq!(found, vec!["info@example.com", "sales@example.com"]);
    }

    #[test]
    fn test_contact_candidates_trim_trailing_slash() {
        assert_eq!(
            contact_candidates("https://example.com/"),
            vec![
                "https://example.com/contact",
                "https://example.com/contact-us"
            ]
        );
    }

    #[test]
    fn test_finalize_dedups_and_orders_deterministically() {
        let matches = vec![
            "sales@example.com".to_string(),
            "info@example.org".to_string(),
            "sales@example.com".to_string(),
        ];
        assert_eq!(
            finalize(matches).as_deref(),
            Some("info@example.org, sales@example.com")
        );
    }

    #[test]
    fn test_finalize_empty() {
        assert!(finalize(Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_absent_website_makes_no_network_call() {
        let discoverer = EmailDiscoverer::new(&DiscoveryConfig::default()).unwrap();
        assert!(discoverer.discover(None).await.is_none());
    }

    #[tokio::test]
    async fn test_homepage_emails_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "write to sales@example.com or info@example.org; icons at admin@localhost",
            ))
            .mount(&server)
            .await;

        let discoverer = EmailDiscoverer::new(&DiscoveryConfig::default()).unwrap();
        let found = discoverer.discover(Some(&server.uri())).await;
        // Two valid addresses survive, the lookalike without a TLD does not;
        // joined in deterministic set order.
        assert_eq!(
            found.as_deref(),
            Some("info@example.org, sales@example.com")
        );
    }

    #[tokio::test]
    async fn test_contact_page_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>no contact info here</p>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("email hello@example.com today"),
            )
            .mount(&server)
            .await;

        let discoverer = EmailDiscoverer::new(&DiscoveryConfig::default()).unwrap();
        let found = discoverer.discover(Some(&server.uri())).await;
        assert_eq!(found.as_deref(), Some("hello@example.com"));
    }

    #[tokio::test]
    async fn test_fallback_failures_are_swallowed() {
        // Homepage 500s, /contact 404s, /contact-us has the address.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact-us"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ping support@example.net"))
            .mount(&server)
            .await;

        let discoverer = EmailDiscoverer::new(&DiscoveryConfig::default()).unwrap();
        let found = discoverer.discover(Some(&server.uri())).await;
        assert_eq!(found.as_deref(), Some("support@example.net"));
    }

    #[tokio::test]
    async fn test_nothing_found_anywhere() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
            .mount(&server)
            .await;

        let discoverer = EmailDiscoverer::new(&DiscoveryConfig::default()).unwrap();
        assert!(discoverer.discover(Some(&server.uri())).await.is_none());
    }
}
