//! Read queries against a GCD dump.
//!
//! Series search, series/issue lookup by id, issue lists, and credits.
//! Lookups by id return `Ok(None)` when nothing matches; only SQLite
//! failures are errors.

use gcd_talker_catalog::fields::{split_characters, split_genres};
use gcd_talker_catalog::issue_number::NO_NUMBER;
use gcd_talker_catalog::types::{GcdCredit, GcdIssue, GcdSeries};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::schema::COMIC_STORY_TYPE;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Separator used for concatenated story columns. Never appears in GCD text.
const LIST_SEP: char = '\u{1f}';

// ── Series Search ───────────────────────────────────────────────────────────

/// How a series name is matched against the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Exact, case-sensitive name equality.
    Literal,
    /// `LIKE` prefix match with spaces as wildcards.
    Like,
    /// FTS5 match of every word (requires `ensure_series_fts`).
    FullText,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Literal => write!(f, "literal"),
            SearchMode::Like => write!(f, "like"),
            SearchMode::FullText => write!(f, "full-text"),
        }
    }
}

const SERIES_COLUMNS: &str = "gcd_series.id, gcd_series.name, gcd_series.sort_name,
    gcd_series.notes, gcd_series.year_began, gcd_series.year_ended,
    gcd_series.issue_count, gcd_publisher.name, gcd_series.publishing_format";

/// Build the `LIKE` pattern: spaces become wildcards, trailing wildcard added.
pub fn like_pattern(name: &str) -> String {
    format!("{}%", name.trim().replace(' ', "%"))
}

/// Build an FTS5 query that requires every word, each quoted as a phrase.
///
/// Returns `None` when the name has no words.
pub fn fts_query(name: &str) -> Option<String> {
    let terms: Vec<String> = name
        .split_whitespace()
        .map(|word| format!("\"{}\"", word.replace('"', "\"\"")))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

/// Find series whose name matches `name` under `mode`.
///
/// Rows come back in database order; ranking is the caller's job.
pub fn search_series(
    conn: &Connection,
    name: &str,
    mode: SearchMode,
) -> Result<Vec<GcdSeries>, QueryError> {
    let (sql, param) = match mode {
        SearchMode::Literal => (
            format!(
                "SELECT {SERIES_COLUMNS}
                 FROM gcd_series
                 LEFT JOIN gcd_publisher ON gcd_series.publisher_id = gcd_publisher.id
                 WHERE gcd_series.name = ?1
                 ORDER BY gcd_series.id"
            ),
            name.to_string(),
        ),
        SearchMode::Like => (
            format!(
                "SELECT {SERIES_COLUMNS}
                 FROM gcd_series
                 LEFT JOIN gcd_publisher ON gcd_series.publisher_id = gcd_publisher.id
                 WHERE gcd_series.name LIKE ?1
                 ORDER BY gcd_series.id"
            ),
            like_pattern(name),
        ),
        SearchMode::FullText => {
            let Some(query) = fts_query(name) else {
                return Ok(Vec::new());
            };
            (
                format!(
                    "SELECT {SERIES_COLUMNS}
                     FROM fts
                     JOIN gcd_series ON fts.rowid = gcd_series.id
                     LEFT JOIN gcd_publisher ON gcd_series.publisher_id = gcd_publisher.id
                     WHERE fts MATCH ?1
                     ORDER BY gcd_series.id"
                ),
                query,
            )
        }
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![param], row_to_series)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Series Lookups ──────────────────────────────────────────────────────────

/// Fetch one series with its publisher name.
pub fn get_series(conn: &Connection, series_id: i64) -> Result<Option<GcdSeries>, QueryError> {
    let sql = format!(
        "SELECT {SERIES_COLUMNS}
         FROM gcd_series
         LEFT JOIN gcd_publisher ON gcd_series.publisher_id = gcd_publisher.id
         WHERE gcd_series.id = ?1"
    );
    conn.query_row(&sql, params![series_id], row_to_series)
        .optional()
        .map_err(Into::into)
}

/// The id of a series' first issue, used to pick a series cover.
pub fn first_issue_id(conn: &Connection, series_id: i64) -> Result<Option<i64>, QueryError> {
    let id: Option<Option<i64>> = conn
        .query_row(
            "SELECT first_issue_id FROM gcd_series WHERE id = ?1",
            params![series_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id.flatten())
}

/// Whether a series contains an issue with `number`.
///
/// With `nn_is_one`, an unnumbered (`[nn]`) issue counts as issue 1.
pub fn series_has_issue(
    conn: &Connection,
    series_id: i64,
    number: &str,
    nn_is_one: bool,
) -> Result<bool, QueryError> {
    let accept_nn = nn_is_one && number == "1";
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM gcd_issue
                       WHERE series_id = ?1 AND (number = ?2 OR (?3 AND number = ?4)))",
        params![series_id, number, accept_nn, NO_NUMBER],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Issue Lists ─────────────────────────────────────────────────────────────

const ISSUE_SUMMARY_COLUMNS: &str = "gcd_issue.id, gcd_issue.series_id, gcd_issue.key_date,
    gcd_issue.number, gcd_issue.title,
    GROUP_CONCAT(CASE WHEN gcd_story.title IS NOT NULL AND gcd_story.title != ''
                 THEN gcd_story.title END, char(31))";

/// One summary row per issue number in a series, in publication order.
pub fn issues_in_series(conn: &Connection, series_id: i64) -> Result<Vec<GcdIssue>, QueryError> {
    let sql = format!(
        "SELECT {ISSUE_SUMMARY_COLUMNS}
         FROM gcd_issue
         LEFT JOIN gcd_story ON gcd_story.issue_id = gcd_issue.id AND gcd_story.type_id = ?2
         WHERE gcd_issue.series_id = ?1
         GROUP BY gcd_issue.number
         ORDER BY MIN(gcd_issue.sort_code), gcd_issue.number"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![series_id, COMIC_STORY_TYPE], row_to_issue_summary)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Issues of a series with `number` whose key date falls in `year`.
///
/// Issues without a key date always pass the year filter. With `nn_is_one`,
/// unnumbered issues match a search for issue 1.
pub fn issues_by_number_and_year(
    conn: &Connection,
    series_id: i64,
    number: &str,
    year: Option<i32>,
    nn_is_one: bool,
) -> Result<Vec<GcdIssue>, QueryError> {
    let accept_nn = nn_is_one && number == "1";
    let year_pattern = match year {
        Some(y) => format!("{y}%"),
        None => "%".to_string(),
    };
    let sql = format!(
        "SELECT {ISSUE_SUMMARY_COLUMNS}
         FROM gcd_issue
         LEFT JOIN gcd_story ON gcd_story.issue_id = gcd_issue.id AND gcd_story.type_id = ?6
         WHERE gcd_issue.series_id = ?1
           AND (gcd_issue.number = ?2 OR (?3 AND gcd_issue.number = ?4))
           AND (gcd_issue.key_date LIKE ?5 OR gcd_issue.key_date = '' OR gcd_issue.key_date IS NULL)
         GROUP BY gcd_issue.number
         ORDER BY MIN(gcd_issue.sort_code)"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            series_id,
            number,
            accept_nn,
            NO_NUMBER,
            year_pattern,
            COMIC_STORY_TYPE
        ],
        row_to_issue_summary,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Resolve a series id and issue number to an issue id.
///
/// An exact number wins over an unnumbered issue accepted via `nn_is_one`.
pub fn find_issue_id(
    conn: &Connection,
    series_id: i64,
    number: &str,
    nn_is_one: bool,
) -> Result<Option<i64>, QueryError> {
    let accept_nn = nn_is_one && number == "1";
    conn.query_row(
        "SELECT id FROM gcd_issue
         WHERE series_id = ?1 AND (number = ?2 OR (?3 AND number = ?4))
         ORDER BY number = ?4, sort_code, id
         LIMIT 1",
        params![series_id, number, accept_nn, NO_NUMBER],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

// ── Complete Issue ──────────────────────────────────────────────────────────

/// Fetch everything known about one issue, credits excluded.
pub fn get_issue(conn: &Connection, issue_id: i64) -> Result<Option<GcdIssue>, QueryError> {
    conn.query_row(
        "SELECT gcd_issue.id, gcd_issue.series_id, gcd_issue.key_date, gcd_issue.number,
                gcd_issue.title,
                GROUP_CONCAT(CASE WHEN gcd_story.title IS NOT NULL AND gcd_story.title != ''
                             THEN gcd_story.title END, char(31)),
                GROUP_CONCAT(CASE WHEN gcd_story.synopsis IS NOT NULL AND gcd_story.synopsis != ''
                             THEN gcd_story.synopsis END, char(31)),
                gcd_issue.notes, gcd_issue.volume, gcd_issue.price, gcd_issue.valid_isbn,
                (SELECT GROUP_CONCAT(gcd_brand_group.name, '; ')
                 FROM gcd_issue AS i
                 JOIN gcd_brand_emblem_group ON i.brand_id = gcd_brand_emblem_group.brand_id
                 JOIN gcd_brand_group ON gcd_brand_emblem_group.brandgroup_id = gcd_brand_group.id
                 LEFT JOIN gcd_series AS s ON i.series_id = s.id
                 LEFT JOIN gcd_publisher AS p ON s.publisher_id = p.id
                 WHERE i.id = ?1 AND p.name IS NOT gcd_brand_group.name),
                gcd_issue.rating,
                GROUP_CONCAT(CASE WHEN gcd_story.characters IS NOT NULL AND gcd_story.characters != ''
                             THEN gcd_story.characters END, ';'),
                stddata_country.name, stddata_country.code,
                stddata_language.name, stddata_language.code,
                GROUP_CONCAT(gcd_story.id, char(31)),
                GROUP_CONCAT(CASE WHEN gcd_story.genre IS NOT NULL AND gcd_story.genre != ''
                             THEN gcd_story.genre END, ';')
         FROM gcd_issue
         LEFT JOIN gcd_story ON gcd_story.issue_id = gcd_issue.id AND gcd_story.type_id = ?2
         LEFT JOIN gcd_indicia_publisher ON gcd_issue.indicia_publisher_id = gcd_indicia_publisher.id
         LEFT JOIN gcd_series ON gcd_issue.series_id = gcd_series.id
         LEFT JOIN stddata_country ON gcd_indicia_publisher.country_id = stddata_country.id
         LEFT JOIN stddata_language ON gcd_series.language_id = stddata_language.id
         WHERE gcd_issue.id = ?1
         GROUP BY gcd_issue.id",
        params![issue_id, COMIC_STORY_TYPE],
        row_to_issue_complete,
    )
    .optional()
    .map_err(Into::into)
}

/// Credits for an issue: issue-level credits first, then each story's.
pub fn issue_credits(
    conn: &Connection,
    issue_id: i64,
    story_ids: &[i64],
) -> Result<Vec<GcdCredit>, QueryError> {
    let mut credits = Vec::new();

    let mut stmt = conn.prepare_cached(
        "SELECT gcd_creator_name_detail.name, gcd_issue_credit.credit_name
         FROM gcd_issue_credit
         JOIN gcd_creator_name_detail ON gcd_issue_credit.creator_id = gcd_creator_name_detail.id
         WHERE gcd_issue_credit.issue_id = ?1
         ORDER BY gcd_issue_credit.id",
    )?;
    let rows = stmt.query_map(params![issue_id], row_to_credit)?;
    for row in rows {
        credits.push(row?);
    }

    let mut stmt = conn.prepare_cached(
        "SELECT gcd_creator_name_detail.name, gcd_credit_type.name
         FROM gcd_story_credit
         JOIN gcd_credit_type ON gcd_credit_type.id = gcd_story_credit.credit_type_id
         JOIN gcd_creator_name_detail ON gcd_creator_name_detail.id = gcd_story_credit.creator_id
         WHERE gcd_story_credit.story_id = ?1
         ORDER BY gcd_story_credit.id",
    )?;
    for story_id in story_ids {
        let rows = stmt.query_map(params![story_id], row_to_credit)?;
        for row in rows {
            credits.push(row?);
        }
    }

    Ok(credits)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_series(row: &rusqlite::Row<'_>) -> rusqlite::Result<GcdSeries> {
    Ok(GcdSeries {
        id: row.get(0)?,
        name: row.get(1)?,
        sort_name: non_empty(row.get(2)?),
        notes: non_empty(row.get(3)?),
        year_began: row.get(4)?,
        year_ended: row.get(5)?,
        count_of_issues: row.get(6)?,
        publisher_name: non_empty(row.get(7)?),
        format: non_empty(row.get(8)?),
        image: None,
        cover_downloaded: false,
    })
}

fn row_to_issue_summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<GcdIssue> {
    Ok(GcdIssue {
        id: row.get(0)?,
        series_id: row.get(1)?,
        key_date: non_empty(row.get(2)?),
        number: row.get(3)?,
        issue_title: non_empty(row.get(4)?),
        story_titles: split_list(row.get(5)?),
        ..Default::default()
    })
}

fn row_to_issue_complete(row: &rusqlite::Row<'_>) -> rusqlite::Result<GcdIssue> {
    let characters: Option<String> = row.get(13)?;
    let genres: Option<String> = row.get(19)?;
    let story_ids: Option<String> = row.get(18)?;
    Ok(GcdIssue {
        id: row.get(0)?,
        series_id: row.get(1)?,
        key_date: non_empty(row.get(2)?),
        number: row.get(3)?,
        issue_title: non_empty(row.get(4)?),
        story_titles: split_list(row.get(5)?),
        synopses: split_list(row.get(6)?),
        issue_notes: non_empty(row.get(7)?),
        volume: non_empty(row.get(8)?),
        price: non_empty(row.get(9)?),
        isbn: non_empty(row.get(10)?),
        imprint: non_empty(row.get(11)?),
        maturity_rating: non_empty(row.get(12)?),
        characters: characters.map(|c| split_characters(&c)).unwrap_or_default(),
        country: non_empty(row.get(14)?),
        country_iso: non_empty(row.get(15)?),
        language: non_empty(row.get(16)?),
        language_iso: non_empty(row.get(17)?),
        story_ids: split_list(story_ids)
            .iter()
            .filter_map(|id| id.parse().ok())
            .collect(),
        genres: genres.map(|g| split_genres(&g)).unwrap_or_default(),
        credits: Vec::new(),
        image: None,
        alt_image_urls: Vec::new(),
        covers_downloaded: false,
    })
}

fn row_to_credit(row: &rusqlite::Row<'_>) -> rusqlite::Result<GcdCredit> {
    Ok(GcdCredit {
        name: row.get(0)?,
        role: row.get(1)?,
    })
}

/// GCD uses empty strings for missing text; treat them as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(LIST_SEP)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
