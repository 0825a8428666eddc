/// Errors that can occur while looking up cover images.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (HTTP {status}) for {url}")]
    ServerError { status: u16, url: String },

    #[error("CloudFlare challenge active, cannot access covers for issue {0}")]
    Challenge(i64),
}

impl ScrapeError {
    /// True when the failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Http(e) if e.is_timeout())
    }
}
