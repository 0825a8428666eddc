//! SQLite access layer for a Grand Comics Database dump.
//!
//! Opens an existing dump, adds the story index and series full-text table
//! when the file is writable, and exposes the read queries the adapter needs.
//! Fixture insert helpers live in `operations` for building test databases.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{IssueRow, SeriesRow, StoryRow};
pub use queries::{
    find_issue_id, first_issue_id, fts_query, get_issue, get_series, issue_credits,
    issues_by_number_and_year, issues_in_series, like_pattern, search_series, series_has_issue,
    QueryError, SearchMode,
};
pub use rusqlite::Connection;
pub use schema::{
    check_status, create_fixture_schema, ensure_series_fts, ensure_story_index, open_database,
    open_memory, DbStatus, SchemaError,
};
