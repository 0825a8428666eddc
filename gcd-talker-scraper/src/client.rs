use std::time::Duration;

use crate::covers::{parse_cover_page, IssueCovers};
use crate::error::ScrapeError;
use crate::rate_limit::RateLimiter;

/// Base address of the Grand Comics Database website.
pub const GCD_WEBSITE: &str = "https://www.comics.org/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can supply cover images for a GCD issue id.
pub trait CoverSource {
    fn issue_covers(&self, issue_id: i64) -> Result<IssueCovers, ScrapeError>;
}

/// Blocking HTTP client for comics.org issue cover pages.
pub struct GcdCoverClient {
    http: reqwest::blocking::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl GcdCoverClient {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_base_url(GCD_WEBSITE)
    }

    /// Create a client against another site root (a mirror or a local server).
    pub fn with_base_url(base_url: &str) -> Result<Self, ScrapeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gcd-talker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::default(),
        })
    }

    /// Replace the default 10-requests-per-10-seconds limiter.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// URL of the page listing every cover of an issue.
    pub fn cover_page_url(&self, issue_id: i64) -> String {
        format!("{}/issue/{issue_id}/cover/4", self.base_url)
    }

    /// Download the raw cover page HTML.
    pub fn fetch_cover_page(&self, issue_id: i64) -> Result<String, ScrapeError> {
        let url = self.cover_page_url(issue_id);
        self.limiter.acquire();
        log::debug!("Fetching {url}");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        let text = resp.text()?;

        // CloudFlare answers challenges with 403/503 and a page we can recognize.
        if !status.is_success() && !text.contains("challenge-error-title") {
            return Err(ScrapeError::ServerError {
                status: status.as_u16(),
                url,
            });
        }
        Ok(text)
    }
}

impl CoverSource for GcdCoverClient {
    fn issue_covers(&self, issue_id: i64) -> Result<IssueCovers, ScrapeError> {
        let html = self.fetch_cover_page(issue_id)?;
        let page = parse_cover_page(&html);
        if page.challenge {
            log::info!("CloudFlare active, cannot access image for ID: {issue_id}");
            return Err(ScrapeError::Challenge(issue_id));
        }
        if page.covers.is_empty() {
            log::info!("No image found for ID: {issue_id}");
        }
        Ok(page.covers)
    }
}
