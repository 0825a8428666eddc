//! Insert helpers for building fixture databases.
//!
//! GCD dumps are produced externally and only ever read by the adapter; these
//! helpers exist so tests (here and in dependent crates) can assemble a small
//! dump with the fixture schema from `schema::create_fixture_schema`.

use rusqlite::{params, Connection};

use crate::queries::QueryError;
use crate::schema::COMIC_STORY_TYPE;

/// A `gcd_series` row.
#[derive(Debug, Clone, Default)]
pub struct SeriesRow {
    pub id: i64,
    pub name: String,
    pub sort_name: Option<String>,
    pub notes: Option<String>,
    pub year_began: Option<i32>,
    pub year_ended: Option<i32>,
    pub issue_count: Option<i32>,
    pub publishing_format: Option<String>,
    pub publisher_id: Option<i64>,
    pub language_id: Option<i64>,
    pub first_issue_id: Option<i64>,
}

/// A `gcd_issue` row. Text columns default to the empty string, as in GCD.
#[derive(Debug, Clone, Default)]
pub struct IssueRow {
    pub id: i64,
    pub series_id: i64,
    pub number: String,
    pub key_date: String,
    pub sort_code: i64,
    pub title: String,
    pub volume: String,
    pub price: String,
    pub isbn: String,
    pub rating: String,
    pub notes: String,
    pub brand_id: Option<i64>,
    pub indicia_publisher_id: Option<i64>,
    pub variant_of_id: Option<i64>,
}

/// A `gcd_story` row. `type_id` of `None` means a comic story.
#[derive(Debug, Clone, Default)]
pub struct StoryRow {
    pub id: i64,
    pub issue_id: i64,
    pub type_id: Option<i64>,
    pub sequence_number: i64,
    pub title: String,
    pub characters: String,
    pub genre: String,
    pub synopsis: String,
}

pub fn insert_country(conn: &Connection, id: i64, code: &str, name: &str) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO stddata_country (id, code, name) VALUES (?1, ?2, ?3)",
        params![id, code, name],
    )?;
    Ok(())
}

pub fn insert_language(conn: &Connection, id: i64, code: &str, name: &str) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO stddata_language (id, code, name) VALUES (?1, ?2, ?3)",
        params![id, code, name],
    )?;
    Ok(())
}

pub fn insert_publisher(conn: &Connection, id: i64, name: &str) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_publisher (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(())
}

pub fn insert_indicia_publisher(
    conn: &Connection,
    id: i64,
    name: &str,
    parent_id: Option<i64>,
    country_id: Option<i64>,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_indicia_publisher (id, name, parent_id, country_id) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, parent_id, country_id],
    )?;
    Ok(())
}

/// Insert a brand and attach it to a brand group (created if new).
pub fn insert_brand(
    conn: &Connection,
    brand_id: i64,
    brand_name: &str,
    group_id: i64,
    group_name: &str,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT OR IGNORE INTO gcd_brand (id, name) VALUES (?1, ?2)",
        params![brand_id, brand_name],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO gcd_brand_group (id, name) VALUES (?1, ?2)",
        params![group_id, group_name],
    )?;
    conn.execute(
        "INSERT INTO gcd_brand_emblem_group (brand_id, brandgroup_id) VALUES (?1, ?2)",
        params![brand_id, group_id],
    )?;
    Ok(())
}

pub fn insert_series(conn: &Connection, series: &SeriesRow) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_series (id, name, sort_name, notes, year_began, year_ended,
                                 is_current, issue_count, publishing_format, publisher_id,
                                 language_id, first_issue_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            series.id,
            series.name,
            series.sort_name.as_deref().unwrap_or(&series.name),
            series.notes.as_deref().unwrap_or(""),
            series.year_began,
            series.year_ended,
            series.year_ended.is_none(),
            series.issue_count,
            series.publishing_format.as_deref().unwrap_or(""),
            series.publisher_id,
            series.language_id,
            series.first_issue_id,
        ],
    )?;
    Ok(())
}

pub fn insert_issue(conn: &Connection, issue: &IssueRow) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_issue (id, series_id, number, key_date, sort_code, title, volume,
                                price, valid_isbn, rating, notes, brand_id,
                                indicia_publisher_id, variant_of_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            issue.id,
            issue.series_id,
            issue.number,
            issue.key_date,
            issue.sort_code,
            issue.title,
            issue.volume,
            issue.price,
            issue.isbn,
            issue.rating,
            issue.notes,
            issue.brand_id,
            issue.indicia_publisher_id,
            issue.variant_of_id,
        ],
    )?;
    Ok(())
}

pub fn insert_story(conn: &Connection, story: &StoryRow) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_story (id, issue_id, type_id, sequence_number, title, characters,
                                genre, synopsis)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            story.id,
            story.issue_id,
            story.type_id.unwrap_or(COMIC_STORY_TYPE),
            story.sequence_number,
            story.title,
            story.characters,
            story.genre,
            story.synopsis,
        ],
    )?;
    Ok(())
}

pub fn insert_credit_type(conn: &Connection, id: i64, name: &str) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_credit_type (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(())
}

pub fn insert_creator(conn: &Connection, id: i64, name: &str) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_creator_name_detail (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(())
}

pub fn insert_story_credit(
    conn: &Connection,
    id: i64,
    story_id: i64,
    creator_id: i64,
    credit_type_id: i64,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_story_credit (id, story_id, creator_id, credit_type_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![id, story_id, creator_id, credit_type_id],
    )?;
    Ok(())
}

pub fn insert_issue_credit(
    conn: &Connection,
    id: i64,
    issue_id: i64,
    creator_id: i64,
    credit_name: &str,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO gcd_issue_credit (id, issue_id, creator_id, credit_name)
         VALUES (?1, ?2, ?3, ?4)",
        params![id, issue_id, creator_id, credit_name],
    )?;
    Ok(())
}
