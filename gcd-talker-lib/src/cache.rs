//! Result cache for fetched series and issues.
//!
//! Records are stored as JSON in a small SQLite file under
//! `~/.cache/gcd-talker/cache.db`. Entries expire after a week so edits to a
//! newer dump eventually show through. Bump `CACHE_VERSION` when the stored
//! record layout changes; a mismatched cache is wiped on open.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use gcd_talker_catalog::{GcdIssue, GcdSeries};
use rusqlite::{Connection, OptionalExtension, params};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Cache format version.
const CACHE_VERSION: i64 = 1;

/// How long an entry stays valid.
pub const CACHE_TTL_DAYS: i64 = 7;

/// Source key stored with every entry.
const SOURCE: &str = "gcd";

const CACHE_FILE: &str = "cache.db";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache error: {0}")]
    Other(String),
}

impl CacheError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// A cached record and whether it was stored as complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub data: T,
    pub complete: bool,
}

/// Entry counts, for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub series: usize,
    pub issues: usize,
}

/// Default cache directory: `~/.cache/gcd-talker/`.
pub fn default_cache_dir() -> Result<PathBuf, CacheError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| CacheError::other("Could not determine cache directory"))?;
    Ok(base.join("gcd-talker"))
}

pub struct MetadataCache {
    conn: Connection,
    path: Option<PathBuf>,
}

impl MetadataCache {
    /// Open (creating if needed) the cache in `dir` and purge stale entries.
    pub fn open(dir: &Path) -> Result<Self, CacheError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CACHE_FILE);
        let conn = Connection::open(&path)?;
        let cache = Self {
            conn,
            path: Some(path),
        };
        cache.init()?;
        let purged = cache.purge_older_than(Utc::now() - Duration::days(CACHE_TTL_DAYS))?;
        if purged > 0 {
            log::debug!("Purged {purged} expired cache entries");
        }
        Ok(cache)
    }

    /// Open the cache in the default directory.
    pub fn open_default() -> Result<Self, CacheError> {
        Self::open(&default_cache_dir()?)
    }

    /// In-memory cache. Useful for testing.
    pub fn open_memory() -> Result<Self, CacheError> {
        let cache = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        cache.init()?;
        Ok(cache)
    }

    /// Location of the cache file, if on disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init(&self) -> Result<(), CacheError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cache_version (version INTEGER NOT NULL);",
        )?;
        let version: Option<i64> = self
            .conn
            .query_row("SELECT MAX(version) FROM cache_version", [], |row| row.get(0))?;

        if version.is_some_and(|v| v != CACHE_VERSION) {
            log::info!("Cache layout changed, clearing result cache");
            self.conn
                .execute_batch("DROP TABLE IF EXISTS series; DROP TABLE IF EXISTS issues;")?;
        }
        if version != Some(CACHE_VERSION) {
            self.conn.execute("DELETE FROM cache_version", [])?;
            self.conn.execute(
                "INSERT INTO cache_version (version) VALUES (?1)",
                params![CACHE_VERSION],
            )?;
        }

        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS series (
                id TEXT NOT NULL,
                source TEXT NOT NULL,
                data TEXT NOT NULL,
                complete INTEGER NOT NULL,
                timestamp INTEGER NOT NULL,
                PRIMARY KEY (id, source)
            );
            CREATE TABLE IF NOT EXISTS issues (
                id TEXT NOT NULL,
                series_id TEXT NOT NULL,
                source TEXT NOT NULL,
                data TEXT NOT NULL,
                complete INTEGER NOT NULL,
                timestamp INTEGER NOT NULL,
                PRIMARY KEY (id, source)
            );
            CREATE INDEX IF NOT EXISTS idx_issues_series ON issues(series_id, source);",
        )?;
        Ok(())
    }

    pub fn get_series(&self, series_id: i64) -> Result<Option<Cached<GcdSeries>>, CacheError> {
        self.get("series", series_id)
    }

    pub fn add_series(&self, series: &GcdSeries, complete: bool) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO series (id, source, data, complete, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                series.id.to_string(),
                SOURCE,
                serde_json::to_string(series)?,
                complete,
                Utc::now().timestamp()
            ],
        )?;
        Ok(())
    }

    pub fn get_issue(&self, issue_id: i64) -> Result<Option<Cached<GcdIssue>>, CacheError> {
        self.get("issues", issue_id)
    }

    pub fn add_issue(&self, issue: &GcdIssue, complete: bool) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO issues (id, series_id, source, data, complete, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                issue.id.to_string(),
                issue.series_id.to_string(),
                SOURCE,
                serde_json::to_string(issue)?,
                complete,
                Utc::now().timestamp()
            ],
        )?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(
        &self,
        table: &str,
        id: i64,
    ) -> Result<Option<Cached<T>>, CacheError> {
        let row: Option<(String, bool)> = self
            .conn
            .query_row(
                &format!("SELECT data, complete FROM {table} WHERE id = ?1 AND source = ?2"),
                params![id.to_string(), SOURCE],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, complete)) = row else {
            return Ok(None);
        };
        match serde_json::from_str(&data) {
            Ok(data) => Ok(Some(Cached { data, complete })),
            Err(e) => {
                // Unreadable entries are treated as misses and refetched.
                log::warn!("Ignoring unreadable cache entry {table}/{id}: {e}");
                Ok(None)
            }
        }
    }

    /// Delete entries stored before `cutoff`. Returns the number removed.
    pub fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, CacheError> {
        let cutoff = cutoff.timestamp();
        let series = self
            .conn
            .execute("DELETE FROM series WHERE timestamp < ?1", params![cutoff])?;
        let issues = self
            .conn
            .execute("DELETE FROM issues WHERE timestamp < ?1", params![cutoff])?;
        Ok(series + issues)
    }

    /// Remove every entry.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.conn
            .execute_batch("DELETE FROM series; DELETE FROM issues;")?;
        Ok(())
    }

    pub fn stats(&self) -> Result<CacheStats, CacheError> {
        let count = |table: &str| -> Result<usize, CacheError> {
            let n: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(CacheStats {
            series: count("series")?,
            issues: count("issues")?,
        })
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
