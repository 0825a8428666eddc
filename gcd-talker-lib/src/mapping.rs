//! Conversion of GCD records into the host's series and metadata records.

use gcd_talker_catalog::issue_number::NO_NUMBER;
use gcd_talker_catalog::{
    ComicMetadata, ComicSeries, GcdIssue, GcdSeries, IssueNumber, MetadataOrigin, match_format,
    parse_key_date, parse_price,
};

use crate::settings::TalkerSettings;
use crate::talker::{ID, NAME, WEBSITE};

/// Paragraph break used in descriptions.
const PARAGRAPH: &str = "\r\n\r\n";

/// Web page of an issue on comics.org.
pub fn issue_web_link(issue_id: i64) -> String {
    format!("{}issue/{issue_id}", WEBSITE)
}

pub fn map_series(series: &GcdSeries) -> ComicSeries {
    ComicSeries {
        id: series.id.to_string(),
        name: series.name.clone(),
        publisher: series.publisher_name.clone(),
        start_year: series.year_began,
        count_of_issues: series.count_of_issues,
        count_of_volumes: None,
        description: series.notes.clone(),
        image_url: series.image.clone().filter(|url| !url.is_empty()),
        aliases: Default::default(),
        format: series.format.as_deref().and_then(match_format),
    }
}

pub fn map_issue(issue: &GcdIssue, series: &GcdSeries, settings: &TalkerSettings) -> ComicMetadata {
    let mut md = ComicMetadata {
        data_origin: Some(MetadataOrigin {
            id: ID.to_string(),
            name: NAME.to_string(),
        }),
        issue_id: Some(issue.id.to_string()),
        series_id: Some(series.id.to_string()),
        publisher: series.publisher_name.clone(),
        series: Some(series.name.clone()).filter(|name| !name.is_empty()),
        ..Default::default()
    };

    let number = IssueNumber::parse(&issue.number).as_string();
    md.issue = if settings.replace_nn_with_one && number == NO_NUMBER {
        Some("1".to_string())
    } else {
        Some(number).filter(|n| !n.is_empty())
    };

    md.cover_image = issue.image.clone().filter(|url| !url.is_empty());
    md.alternate_images = issue.alt_image_urls.clone();

    md.characters = issue.characters.iter().cloned().collect();
    md.genres = issue.genres.iter().cloned().collect();
    for credit in &issue.credits {
        md.add_credit(&credit.name, &credit.role);
    }

    md.title = issue.issue_title.clone();
    if (settings.prefer_story_titles || md.title.is_none()) && !issue.story_titles.is_empty() {
        md.title = Some(issue.story_titles.join("; "));
    }

    md.price = issue
        .price
        .as_deref()
        .and_then(|price| parse_price(price, &settings.currency));
    md.identifier = issue.isbn.clone();

    if series.year_ended.is_some() || settings.use_ongoing_issue_count {
        md.issue_count = series.count_of_issues;
    }

    md.description = description(issue, series, settings);
    md.web_links = vec![issue_web_link(issue.id)];

    md.volume = issue
        .volume
        .as_deref()
        .and_then(|v| v.trim().parse::<i32>().ok());
    if settings.use_series_start_as_volume {
        md.volume = series.year_began;
    }

    match issue.key_date.as_deref() {
        Some(key_date) => {
            let date = parse_key_date(key_date);
            md.day = date.day;
            md.month = date.month;
            md.year = date.year;
        }
        None => md.year = series.year_began,
    }

    md.language = issue.language_iso.clone();
    md.country = issue.country.clone();
    md.format = series.format.as_deref().and_then(match_format);
    md.maturity_rating = issue.maturity_rating.clone();
    md.imprint = issue.imprint.clone();

    md
}

/// Notes (optionally) followed by the story synopses.
///
/// When every story title has a synopsis slot, each synopsis is prefixed with
/// its title; otherwise the synopses are joined as paragraphs.
fn description(issue: &GcdIssue, series: &GcdSeries, settings: &TalkerSettings) -> Option<String> {
    let mut text = String::new();
    if settings.combine_notes {
        text.push_str(series.notes.as_deref().unwrap_or_default());
        text.push_str(issue.issue_notes.as_deref().unwrap_or_default());
    }

    if issue.synopses.len() == issue.story_titles.len() {
        for (title, synopsis) in issue.story_titles.iter().zip(&issue.synopses) {
            if !title.is_empty() && !synopsis.is_empty() {
                text.push_str(&format!("{title}: {synopsis}{PARAGRAPH}"));
            }
        }
    } else {
        text.push_str(&issue.synopses.join(PARAGRAPH));
    }

    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
#[path = "tests/mapping_tests.rs"]
mod tests;
