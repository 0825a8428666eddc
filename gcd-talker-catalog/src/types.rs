//! Data model types for the adapter.
//!
//! `Gcd*` types mirror rows read from the Grand Comics Database dump; they are
//! what the result cache persists. `ComicSeries` and `ComicMetadata` are the
//! normalized shapes handed back to the host tagging application.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ── GCD Records ─────────────────────────────────────────────────────────────

/// A series row joined with its publisher name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GcdSeries {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub year_began: Option<i32>,
    #[serde(default)]
    pub year_ended: Option<i32>,
    #[serde(default)]
    pub count_of_issues: Option<i32>,
    #[serde(default)]
    pub publisher_name: Option<String>,
    /// Free-text `publishing_format` column.
    #[serde(default)]
    pub format: Option<String>,
    /// Cover URL of the series' first issue, when covers were requested.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cover_downloaded: bool,
}

/// An issue row with its aggregated story data.
///
/// List queries only fill the identifying fields plus story titles; a
/// "complete" fetch fills everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GcdIssue {
    pub id: i64,
    pub series_id: i64,
    #[serde(default)]
    pub key_date: Option<String>,
    pub number: String,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub story_titles: Vec<String>,
    #[serde(default)]
    pub synopses: Vec<String>,
    #[serde(default)]
    pub issue_notes: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub imprint: Option<String>,
    #[serde(default)]
    pub maturity_rating: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_iso: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_iso: Option<String>,
    /// Ids of the comic-story rows, used to gather story credits.
    #[serde(default)]
    pub story_ids: Vec<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub credits: Vec<GcdCredit>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt_image_urls: Vec<String>,
    #[serde(default)]
    pub covers_downloaded: bool,
}

/// A creator credit from either the issue or one of its stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcdCredit {
    pub name: String,
    /// GCD credit type name (`script`, `pencils`, ...) or free-text issue credit.
    pub role: String,
}

// ── Host Records ────────────────────────────────────────────────────────────

/// Which talker produced a metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOrigin {
    pub id: String,
    pub name: String,
}

/// A series as the host's series-selection window expects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComicSeries {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
    pub start_year: Option<i32>,
    pub count_of_issues: Option<i32>,
    pub count_of_volumes: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    pub format: Option<String>,
}

/// A person credited on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub person: String,
    pub role: String,
    #[serde(default)]
    pub primary: bool,
}

/// The host's normalized issue metadata record.
///
/// Every field is optional; absent source data stays absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComicMetadata {
    pub data_origin: Option<MetadataOrigin>,
    pub issue_id: Option<String>,
    pub series_id: Option<String>,
    pub series: Option<String>,
    pub issue: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub imprint: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub issue_count: Option<i32>,
    pub volume: Option<i32>,
    pub description: Option<String>,
    #[serde(default)]
    pub characters: BTreeSet<String>,
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    pub price: Option<f64>,
    pub identifier: Option<String>,
    #[serde(default)]
    pub web_links: Vec<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub format: Option<String>,
    pub maturity_rating: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub alternate_images: Vec<String>,
}

impl ComicMetadata {
    /// Add a credit unless the same person already holds the same role.
    ///
    /// Names and roles compare case-insensitively; blank names are ignored.
    pub fn add_credit(&mut self, person: &str, role: &str) {
        let person = person.trim();
        let role = role.trim();
        if person.is_empty() {
            return;
        }
        let duplicate = self.credits.iter().any(|c| {
            c.person.to_lowercase() == person.to_lowercase()
                && c.role.to_lowercase() == role.to_lowercase()
        });
        if !duplicate {
            self.credits.push(Credit {
                person: person.to_string(),
                role: role.to_string(),
                primary: false,
            });
        }
    }

    /// True when no field has been populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
