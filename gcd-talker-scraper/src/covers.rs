//! Parsing of comics.org issue cover pages.
//!
//! The page lists the main cover and every variant as `<img class="cover_img">`.
//! When CloudFlare intercepts the request the page instead carries an element
//! with id `challenge-error-title`. The markup is HTML, not XML, so the reader
//! is configured leniently and recoverable syntax errors are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const COVER_CLASS: &str = "cover_img";
const CHALLENGE_ID: &str = "challenge-error-title";
const MAX_PARSE_ERRORS: usize = 64;

/// Cover images found for one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCovers {
    /// Main cover URL.
    pub cover: Option<String>,
    /// Variant cover URLs, in page order.
    pub variants: Vec<String>,
}

impl IssueCovers {
    pub fn is_empty(&self) -> bool {
        self.cover.is_none() && self.variants.is_empty()
    }
}

/// Everything of interest on a cover page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverPage {
    pub covers: IssueCovers,
    /// The CloudFlare challenge marker was present.
    pub challenge: bool,
}

/// Extract cover image URLs from a cover page.
///
/// Query strings are stripped from each `src` so URLs stay stable for caching.
pub fn parse_cover_page(html: &str) -> CoverPage {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut page = CoverPage::default();
    let mut errors = 0;
    let mut last_error_at = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => inspect_element(e, &mut page),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                // Inline scripts and stray markup trip the reader; skip past
                // them unless it stops making progress.
                let position = reader.buffer_position();
                errors += 1;
                if errors > MAX_PARSE_ERRORS || last_error_at == Some(position) {
                    log::debug!("Stopped parsing cover page at byte {position}: {e}");
                    break;
                }
                last_error_at = Some(position);
            }
        }
    }
    page
}

fn inspect_element(e: &BytesStart<'_>, page: &mut CoverPage) {
    let is_img = e.name().as_ref().eq_ignore_ascii_case(b"img");
    let mut src = None;
    let mut is_cover = false;

    for attr in e.html_attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        match attr.key.as_ref() {
            b"id" if value == CHALLENGE_ID => page.challenge = true,
            b"class" if is_img => {
                is_cover = value.split_whitespace().any(|c| c == COVER_CLASS);
            }
            b"src" if is_img => src = Some(value),
            _ => {}
        }
    }

    if !is_cover {
        return;
    }
    let Some(src) = src else {
        return;
    };
    let url = strip_query(&src);
    if url.is_empty() {
        return;
    }
    if page.covers.cover.is_none() {
        page.covers.cover = Some(url.to_string());
    } else {
        page.covers.variants.push(url.to_string());
    }
}

fn strip_query(src: &str) -> &str {
    src.split('?').next().unwrap_or_default().trim()
}

#[cfg(test)]
#[path = "tests/covers_tests.rs"]
mod tests;
