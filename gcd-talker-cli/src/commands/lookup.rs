use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use gcd_talker_lib::{GcdTalker, SeriesQuery};

use crate::cli_types::IssueTarget;
use crate::{CliError, Output};

use super::display::{print_issue, print_issue_row, print_series, print_series_row};

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Test access to the database.
pub(crate) fn run_status(
    talker: &GcdTalker,
    path: Option<&Path>,
    out: Output,
) -> Result<(), CliError> {
    let status = talker.check_status(path);
    if out.json {
        print_json(&serde_json::json!({"message": status.message, "ok": status.ok}))?;
    } else if status.ok {
        log::info!(
            "{} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            status.message,
        );
    }
    if status.ok {
        Ok(())
    } else {
        Err(CliError::not_found(status.message))
    }
}

pub(crate) fn run_search(
    talker: &GcdTalker,
    query: &SeriesQuery,
    out: Output,
) -> Result<(), CliError> {
    let results = talker.search_for_series(query)?;
    if out.json {
        return print_json(&results);
    }

    if results.is_empty() {
        log::info!(
            "{}",
            format!("No series found for '{}'.", query.name)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }
    log::info!(
        "{}",
        format!("{} series matching '{}':", results.len(), query.name)
            .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for series in &results {
        print_series_row(series);
    }
    Ok(())
}

pub(crate) fn run_series(talker: &GcdTalker, series_id: &str, out: Output) -> Result<(), CliError> {
    let series = talker
        .fetch_series(series_id)?
        .ok_or_else(|| CliError::not_found(format!("Series ID {series_id} not found")))?;
    if out.json {
        return print_json(&series);
    }
    print_series(&series);
    Ok(())
}

pub(crate) fn run_issues(talker: &GcdTalker, series_id: &str, out: Output) -> Result<(), CliError> {
    let issues = talker
        .fetch_issues_in_series(series_id)?
        .ok_or_else(|| CliError::not_found(format!("Series ID {series_id} not found")))?;
    if out.json {
        return print_json(&issues);
    }

    log::info!(
        "{}",
        format!("{} issues in series {series_id}:", issues.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for issue in &issues {
        print_issue_row(issue);
    }
    Ok(())
}

pub(crate) fn run_issue(
    talker: &GcdTalker,
    target: &IssueTarget,
    out: Output,
) -> Result<(), CliError> {
    let issue = talker
        .fetch_comic_data(
            target.issue_id.as_deref(),
            target.series_id.as_deref(),
            target.number.as_deref(),
        )?
        .ok_or_else(|| CliError::not_found("Issue not found"))?;
    if out.json {
        return print_json(&issue);
    }
    print_issue(&issue);
    Ok(())
}

/// Find `number` across candidate series, as auto-tagging does.
pub(crate) fn run_match(
    talker: &GcdTalker,
    series_ids: &[String],
    number: &str,
    year: Option<i32>,
    out: Output,
) -> Result<(), CliError> {
    let issues = talker.fetch_issues_by_series_issue_num_and_year(series_ids, number, year)?;
    if out.json {
        return print_json(&issues);
    }

    if issues.is_empty() {
        log::info!(
            "{}",
            format!("No issue #{number} in the given series.")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }
    log::info!(
        "{}",
        format!("{} candidate issues:", issues.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for issue in &issues {
        print_issue_row(issue);
    }
    Ok(())
}
