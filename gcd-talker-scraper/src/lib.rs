//! Best-effort cover image lookup against comics.org.
//!
//! The GCD data dump carries no image references, so covers are scraped from
//! each issue's cover page. Requests are rate limited and every failure is
//! reported to the caller, who treats covers as optional.

pub mod client;
pub mod covers;
pub mod error;
pub mod rate_limit;

pub use client::{CoverSource, GCD_WEBSITE, GcdCoverClient};
pub use covers::{CoverPage, IssueCovers, parse_cover_page};
pub use error::ScrapeError;
pub use rate_limit::RateLimiter;
