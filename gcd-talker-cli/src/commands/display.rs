//! Human-readable rendering of series and issue records.

use gcd_talker_catalog::{ComicMetadata, ComicSeries};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::truncate_str;

const NAME_WIDTH: usize = 48;

/// One line per series: id, name, publisher, start year, issue count.
pub(crate) fn print_series_row(series: &ComicSeries) {
    let year = series
        .start_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    let count = series
        .count_of_issues
        .map(|n| format!("{n} issues"))
        .unwrap_or_default();
    log::info!(
        "  {:>8}  {:<width$}  {}  {}  {}",
        series.id.if_supports_color(Stdout, |t| t.dimmed()),
        truncate_str(&series.name, NAME_WIDTH).if_supports_color(Stdout, |t| t.bold()),
        year,
        series
            .publisher
            .as_deref()
            .unwrap_or("")
            .if_supports_color(Stdout, |t| t.cyan()),
        count,
        width = NAME_WIDTH,
    );
}

pub(crate) fn print_series(series: &ComicSeries) {
    log::info!(
        "{} {}",
        series.name.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", series.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    field("Publisher", series.publisher.as_deref());
    field("Start year", series.start_year.map(|y| y.to_string()).as_deref());
    field(
        "Issues",
        series.count_of_issues.map(|n| n.to_string()).as_deref(),
    );
    field("Format", series.format.as_deref());
    field("Cover", series.image_url.as_deref());
    if let Some(description) = &series.description {
        crate::log_blank();
        log::info!("{}", description.trim());
    }
}

/// One line per issue: id, number, cover date, title.
pub(crate) fn print_issue_row(issue: &ComicMetadata) {
    log::info!(
        "  {:>8}  #{:<6}  {:<10}  {}{}",
        issue
            .issue_id
            .as_deref()
            .unwrap_or("")
            .if_supports_color(Stdout, |t| t.dimmed()),
        issue.issue.as_deref().unwrap_or("?"),
        cover_date(issue),
        issue.title.as_deref().unwrap_or(""),
        issue
            .series
            .as_deref()
            .map(|s| format!("  ({s})"))
            .unwrap_or_default(),
    );
}

pub(crate) fn print_issue(issue: &ComicMetadata) {
    log::info!(
        "{} #{} {}",
        issue
            .series
            .as_deref()
            .unwrap_or("Unknown series")
            .if_supports_color(Stdout, |t| t.bold()),
        issue.issue.as_deref().unwrap_or("?"),
        format!("[{}]", issue.issue_id.as_deref().unwrap_or("")).if_supports_color(Stdout, |t| t.dimmed()),
    );
    field("Title", issue.title.as_deref());
    field("Publisher", issue.publisher.as_deref());
    field("Imprint", issue.imprint.as_deref());
    let date = cover_date(issue);
    field("Cover date", Some(date.as_str()).filter(|d| !d.is_empty()));
    field("Volume", issue.volume.map(|v| v.to_string()).as_deref());
    field("Issue count", issue.issue_count.map(|n| n.to_string()).as_deref());
    field("Format", issue.format.as_deref());
    field("Price", issue.price.map(|p| format!("{p:.2}")).as_deref());
    field("ISBN", issue.identifier.as_deref());
    field("Rating", issue.maturity_rating.as_deref());
    field("Language", issue.language.as_deref());
    field("Country", issue.country.as_deref());
    list("Genres", issue.genres.iter());
    list("Characters", issue.characters.iter());
    field("Cover", issue.cover_image.as_deref());
    list("Variants", issue.alternate_images.iter());
    list("Links", issue.web_links.iter());

    if !issue.credits.is_empty() {
        crate::log_blank();
        log::info!("{}", "Credits".if_supports_color(Stdout, |t| t.bold()));
        for credit in &issue.credits {
            log::info!(
                "  {:<24} {}",
                credit.person,
                credit.role.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    if let Some(description) = &issue.description {
        crate::log_blank();
        for paragraph in description.split("\r\n\r\n").filter(|p| !p.trim().is_empty()) {
            log::info!("{}", paragraph.trim());
        }
    }
}

/// `YYYY-MM-DD`, dropping unknown trailing parts.
fn cover_date(issue: &ComicMetadata) -> String {
    match (issue.year, issue.month, issue.day) {
        (Some(y), Some(m), Some(d)) => format!("{y:04}-{m:02}-{d:02}"),
        (Some(y), Some(m), None) => format!("{y:04}-{m:02}"),
        (Some(y), None, _) => format!("{y:04}"),
        _ => String::new(),
    }
}

fn field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        log::info!(
            "  {:<12} {}",
            format!("{label}:").if_supports_color(Stdout, |t| t.dimmed()),
            value
        );
    }
}

fn list<'a>(label: &str, values: impl Iterator<Item = &'a String>) {
    let joined = values.map(String::as_str).collect::<Vec<_>>().join(", ");
    if !joined.is_empty() {
        field(label, Some(&joined));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_date_drops_unknown_parts() {
        let mut issue = ComicMetadata {
            year: Some(1940),
            month: Some(4),
            day: Some(25),
            ..Default::default()
        };
        assert_eq!(cover_date(&issue), "1940-04-25");
        issue.day = None;
        assert_eq!(cover_date(&issue), "1940-04");
        issue.month = None;
        assert_eq!(cover_date(&issue), "1940");
        issue.year = None;
        assert_eq!(cover_date(&issue), "");
    }
}
