//! Opening the GCD dump, status probing, and one-time index/FTS setup.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database path is empty, specify a path and filename")]
    EmptyPath,
    #[error("Database path or filename is invalid: {}", .0.display())]
    Missing(PathBuf),
}

/// Story `type_id` of "comic story" rows; other types are covers, ads, letters pages.
pub const COMIC_STORY_TYPE: i64 = 19;

/// Name of the index the issue list queries depend on.
pub const STORY_INDEX_NAME: &str = "issue_id_on_type_id";

/// Name of the FTS5 table mirroring `gcd_series.name`.
pub const SERIES_FTS_TABLE: &str = "fts";

/// Validate that `path` names an existing file.
pub fn check_path(path: &Path) -> Result<(), SchemaError> {
    if path.as_os_str().is_empty() {
        return Err(SchemaError::EmptyPath);
    }
    if !path.is_file() {
        return Err(SchemaError::Missing(path.to_path_buf()));
    }
    Ok(())
}

/// Open an existing GCD SQLite dump.
///
/// The file is never created. It is opened read-write so the story index and
/// FTS table can be added; SQLite falls back to read-only for protected files.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    check_path(path)?;
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Open an in-memory database with the fixture schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_fixture_schema(&conn)?;
    Ok(conn)
}

/// Outcome of a database access test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStatus {
    pub message: String,
    pub ok: bool,
}

impl DbStatus {
    fn new(message: &str, ok: bool) -> Self {
        Self {
            message: message.to_string(),
            ok,
        }
    }
}

/// Check that `path` is a readable GCD dump.
///
/// Never fails: problems are reported in the returned status.
pub fn check_status(path: &Path) -> DbStatus {
    if !path.is_file() {
        return DbStatus::new("DB path does not exist", false);
    }

    let probe = || -> Result<(), SchemaError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        conn.query_row("SELECT * FROM gcd_credit_type LIMIT 1", [], |_| Ok(()))
            .optional()?;
        Ok(())
    };

    match probe() {
        Ok(()) => DbStatus::new("The DB access test was successful", true),
        Err(e) => {
            log::debug!("DB access test failed: {e}");
            DbStatus::new("DB access failed", false)
        }
    }
}

/// Whether a table or index with `name` exists.
fn object_exists(conn: &Connection, kind: &str, name: &str) -> Result<bool, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2)",
        [kind, name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Make sure `gcd_story(type_id, issue_id)` is indexed.
///
/// Without it the issue list queries are very slow. Returns `false` when the
/// index is missing and could not be created (read-only file).
pub fn ensure_story_index(conn: &Connection) -> Result<bool, SchemaError> {
    if object_exists(conn, "index", STORY_INDEX_NAME)? {
        return Ok(true);
    }
    match conn.execute_batch(&format!(
        "CREATE INDEX {STORY_INDEX_NAME} ON gcd_story (type_id, issue_id);"
    )) {
        Ok(()) => {
            log::info!("Created index {STORY_INDEX_NAME} on gcd_story");
            Ok(true)
        }
        Err(rusqlite::Error::SqliteFailure(err, msg))
            if err.code == rusqlite::ErrorCode::ReadOnly =>
        {
            log::warn!(
                "Cannot create index {STORY_INDEX_NAME}, database is read-only: {}",
                msg.unwrap_or_default()
            );
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Whether the linked SQLite was compiled with FTS5.
pub fn fts5_compiled(conn: &Connection) -> Result<bool, SchemaError> {
    let mut stmt = conn.prepare("PRAGMA compile_options")?;
    let options = stmt.query_map([], |row| row.get::<_, String>(0))?;
    for option in options {
        if option? == "ENABLE_FTS5" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Make sure the series-name FTS5 table exists and is populated.
///
/// Returns whether full-text search can be used. `false` means the caller
/// should fall back to `LIKE` matching.
pub fn ensure_series_fts(conn: &Connection) -> Result<bool, SchemaError> {
    if !fts5_compiled(conn)? {
        log::debug!("SQLite has no FTS5 support");
        return Ok(false);
    }
    if object_exists(conn, "table", SERIES_FTS_TABLE)? {
        return Ok(true);
    }

    let created = conn.execute_batch(&format!(
        "CREATE VIRTUAL TABLE {SERIES_FTS_TABLE} USING fts5(name, content='gcd_series', \
         content_rowid='id', tokenize = 'porter unicode61 remove_diacritics 1');
         INSERT INTO {SERIES_FTS_TABLE}({SERIES_FTS_TABLE}) VALUES('rebuild');"
    ));
    match created {
        Ok(()) => {
            log::info!("Built full-text index of series names");
            Ok(true)
        }
        Err(rusqlite::Error::SqliteFailure(err, msg))
            if err.code == rusqlite::ErrorCode::ReadOnly =>
        {
            log::warn!(
                "Cannot build full-text index, database is read-only: {}",
                msg.unwrap_or_default()
            );
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Create the subset of the GCD schema the queries touch.
///
/// Real dumps already carry these tables (with many more columns); this is
/// for building small fixture databases. Idempotent.
pub fn create_fixture_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(FIXTURE_SCHEMA_SQL)?;
    Ok(())
}

const FIXTURE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stddata_country (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stddata_language (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gcd_publisher (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    country_id INTEGER REFERENCES stddata_country(id)
);

CREATE TABLE IF NOT EXISTS gcd_indicia_publisher (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id INTEGER REFERENCES gcd_publisher(id),
    country_id INTEGER REFERENCES stddata_country(id)
);

CREATE TABLE IF NOT EXISTS gcd_brand (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gcd_brand_group (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gcd_brand_emblem_group (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    brand_id INTEGER NOT NULL REFERENCES gcd_brand(id),
    brandgroup_id INTEGER NOT NULL REFERENCES gcd_brand_group(id)
);

CREATE TABLE IF NOT EXISTS gcd_series (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    sort_name TEXT,
    notes TEXT,
    year_began INTEGER,
    year_ended INTEGER,
    is_current INTEGER NOT NULL DEFAULT 0,
    issue_count INTEGER,
    publishing_format TEXT,
    publisher_id INTEGER REFERENCES gcd_publisher(id),
    country_id INTEGER REFERENCES stddata_country(id),
    language_id INTEGER REFERENCES stddata_language(id),
    first_issue_id INTEGER
);

CREATE TABLE IF NOT EXISTS gcd_issue (
    id INTEGER PRIMARY KEY,
    number TEXT NOT NULL,
    key_date TEXT NOT NULL DEFAULT '',
    sort_code INTEGER NOT NULL DEFAULT 0,
    title TEXT NOT NULL DEFAULT '',
    volume TEXT NOT NULL DEFAULT '',
    price TEXT NOT NULL DEFAULT '',
    valid_isbn TEXT NOT NULL DEFAULT '',
    rating TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    series_id INTEGER NOT NULL REFERENCES gcd_series(id),
    brand_id INTEGER REFERENCES gcd_brand(id),
    indicia_publisher_id INTEGER REFERENCES gcd_indicia_publisher(id),
    variant_of_id INTEGER REFERENCES gcd_issue(id)
);
CREATE INDEX IF NOT EXISTS idx_issue_series ON gcd_issue(series_id);

CREATE TABLE IF NOT EXISTS gcd_story (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    sequence_number INTEGER NOT NULL DEFAULT 0,
    type_id INTEGER NOT NULL,
    characters TEXT NOT NULL DEFAULT '',
    genre TEXT NOT NULL DEFAULT '',
    synopsis TEXT NOT NULL DEFAULT '',
    issue_id INTEGER NOT NULL REFERENCES gcd_issue(id)
);

CREATE TABLE IF NOT EXISTS gcd_credit_type (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gcd_creator_name_detail (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gcd_story_credit (
    id INTEGER PRIMARY KEY,
    story_id INTEGER NOT NULL REFERENCES gcd_story(id),
    creator_id INTEGER NOT NULL REFERENCES gcd_creator_name_detail(id),
    credit_type_id INTEGER NOT NULL REFERENCES gcd_credit_type(id)
);

CREATE TABLE IF NOT EXISTS gcd_issue_credit (
    id INTEGER PRIMARY KEY,
    issue_id INTEGER NOT NULL REFERENCES gcd_issue(id),
    creator_id INTEGER NOT NULL REFERENCES gcd_creator_name_detail(id),
    credit_name TEXT NOT NULL DEFAULT ''
);
"#;
