//! Series search input and result ranking.
//!
//! The database returns candidates in id order. Results are re-ordered so the
//! series a user most likely meant comes first.

use std::cmp::Ordering;

use gcd_talker_catalog::GcdSeries;
use serde::{Deserialize, Serialize};

use crate::error::TalkerError;

/// A series search as requested by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub name: String,
    /// Only keep series running in this year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Only keep series containing this issue number.
    #[serde(default)]
    pub issue_number: Option<String>,
    /// Exact, case-sensitive name match only.
    #[serde(default)]
    pub literal: bool,
}

impl SeriesQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_issue_number(mut self, number: impl Into<String>) -> Self {
        self.issue_number = Some(number.into());
        self
    }

    pub fn literal(mut self) -> Self {
        self.literal = true;
        self
    }

    /// Reject blank names and blank issue numbers.
    pub fn validate(&self) -> Result<(), TalkerError> {
        if self.name.trim().is_empty() {
            return Err(TalkerError::invalid_input("Series name must not be empty"));
        }
        if self
            .issue_number
            .as_deref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(TalkerError::invalid_input("Issue number must not be empty"));
        }
        Ok(())
    }
}

/// How closely a series name matches the searched name. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relevance {
    Exact,
    Prefix,
    Substring,
    AllWords,
    Other,
}

/// Classify `name` against the searched text.
pub fn relevance(search: &str, name: &str) -> Relevance {
    let search = normalize(search);
    let name = normalize(name);
    if search.is_empty() {
        return Relevance::Other;
    }
    if name == search {
        Relevance::Exact
    } else if name.starts_with(&search) {
        Relevance::Prefix
    } else if name.contains(&search) {
        Relevance::Substring
    } else if search
        .split(' ')
        .all(|word| name.split(' ').any(|w| w == word))
    {
        Relevance::AllWords
    } else {
        Relevance::Other
    }
}

/// Lower-case and collapse whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn without_article(name: &str) -> &str {
    let trimmed = name.trim_start();
    match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("the ") => &trimmed[4..],
        _ => trimmed,
    }
}

/// Whether the series was running during `year`. Unknown bounds pass.
pub fn running_in(series: &GcdSeries, year: i32) -> bool {
    series.year_began.is_none_or(|began| began <= year)
        && series.year_ended.is_none_or(|ended| ended >= year)
}

/// Order candidates by relevance to `search`.
///
/// Ties go to the name matching once a leading "The " is ignored, then the
/// series with more issues, then the earlier start year, then the lower id.
pub fn rank_series(search: &str, mut series: Vec<GcdSeries>) -> Vec<GcdSeries> {
    let search_key = normalize(without_article(search));
    series.sort_by(|a, b| {
        relevance(search, &a.name)
            .cmp(&relevance(search, &b.name))
            .then_with(|| {
                let a_article = normalize(without_article(&a.name)) == search_key;
                let b_article = normalize(without_article(&b.name)) == search_key;
                b_article.cmp(&a_article)
            })
            .then_with(|| b.count_of_issues.unwrap_or(0).cmp(&a.count_of_issues.unwrap_or(0)))
            .then_with(|| compare_years(a.year_began, b.year_began))
            .then_with(|| a.id.cmp(&b.id))
    });
    series
}

/// Known years first, earlier before later.
fn compare_years(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
