//! The Grand Comics Database talker.
//!
//! Answers the host's lookup operations from a local GCD dump. A database
//! connection is opened per operation. Fetched series and issues go through
//! the optional result cache, and covers come from an optional cover source.

use std::path::Path;

use gcd_talker_catalog::{ComicMetadata, ComicSeries, GcdIssue, GcdSeries};
use gcd_talker_db::{self as db, Connection, DbStatus, SchemaError, SearchMode};
use gcd_talker_scraper::{CoverSource, IssueCovers};

use crate::cache::MetadataCache;
use crate::error::TalkerError;
use crate::mapping::{map_issue, map_series};
use crate::search::{SeriesQuery, rank_series, running_in};
use crate::settings::TalkerSettings;

pub const NAME: &str = "Grand Comics Database";
pub const ID: &str = "gcd";
pub const WEBSITE: &str = "https://www.comics.org/";
pub const LOGO_URL: &str = "https://files1.comics.org/static/img/gcd_logo.aaf0e64616e2.png";
pub const ATTRIBUTION: &str = "Data from <a href='https://www.comics.org/'>Grand Comics Database</a> \
     (<a href='http://creativecommons.org/licenses/by/3.0/'>CCA license</a>)";
pub const ABOUT: &str = "<a href='https://www.comics.org/'>Grand Comics Database\u{2122}</a> is an \
     ongoing international project to build a detailed comic-book database that will be easy to \
     use and understand, and also easy for contributors to add information to it.";

pub struct GcdTalker {
    settings: TalkerSettings,
    cache: Option<MetadataCache>,
    covers: Option<Box<dyn CoverSource>>,
}

impl GcdTalker {
    pub fn new(settings: TalkerSettings) -> Self {
        Self {
            settings,
            cache: None,
            covers: None,
        }
    }

    /// Use a result cache for series and issue records.
    pub fn with_cache(mut self, cache: MetadataCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use `source` when covers are requested by the settings.
    pub fn with_cover_source(mut self, source: Box<dyn CoverSource>) -> Self {
        self.covers = Some(source);
        self
    }

    pub fn settings(&self) -> &TalkerSettings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: TalkerSettings) {
        self.settings = settings;
    }

    pub fn cache(&self) -> Option<&MetadataCache> {
        self.cache.as_ref()
    }

    // ── Operations ──────────────────────────────────────────────────────────

    /// Test access to `db_file`, or to the configured dump when `None`.
    pub fn check_status(&self, db_file: Option<&Path>) -> DbStatus {
        match db_file.or(self.settings.db_file.as_deref()) {
            Some(path) => db::check_status(path),
            None => DbStatus {
                message: "DB path does not exist".to_string(),
                ok: false,
            },
        }
    }

    /// Search series by name, best matches first.
    pub fn search_for_series(&self, query: &SeriesQuery) -> Result<Vec<ComicSeries>, TalkerError> {
        query.validate()?;
        let conn = self.open()?;

        let mode = if query.literal {
            SearchMode::Literal
        } else if db::ensure_series_fts(&conn)? {
            SearchMode::FullText
        } else {
            SearchMode::Like
        };
        log::info!("{NAME} searching: {} ({mode})", query.name);

        let mut candidates = db::search_series(&conn, &query.name, mode)?;
        if let Some(year) = query.year {
            candidates.retain(|s| running_in(s, year));
        }
        if let Some(number) = query.issue_number.as_deref() {
            let number = number.trim();
            let mut kept = Vec::with_capacity(candidates.len());
            for series in candidates {
                if db::series_has_issue(&conn, series.id, number, self.settings.nn_is_issue_one)? {
                    kept.push(series);
                }
            }
            candidates = kept;
        }

        let ranked = rank_series(&query.name, candidates);
        log::debug!("{} series matched '{}'", ranked.len(), query.name);
        Ok(ranked.iter().map(map_series).collect())
    }

    /// Fetch one series. `None` when the id is unknown.
    pub fn fetch_series(&self, series_id: &str) -> Result<Option<ComicSeries>, TalkerError> {
        let id = parse_id(series_id, "series")?;
        let conn = self.open()?;
        Ok(self.series_record(&conn, id)?.as_ref().map(map_series))
    }

    /// Fetch full metadata for one issue, by issue id or by series id and
    /// issue number. `None` when nothing matches.
    pub fn fetch_comic_data(
        &self,
        issue_id: Option<&str>,
        series_id: Option<&str>,
        issue_number: Option<&str>,
    ) -> Result<Option<ComicMetadata>, TalkerError> {
        let issue_id = issue_id.filter(|s| !s.trim().is_empty());
        let series_id = series_id.filter(|s| !s.trim().is_empty());
        let issue_number = issue_number.map(str::trim).filter(|s| !s.is_empty());

        enum Target<'a> {
            Issue(i64),
            Numbered(i64, &'a str),
        }
        let target = match (issue_id, series_id, issue_number) {
            (Some(issue_id), _, _) => Target::Issue(parse_id(issue_id, "issue")?),
            (None, Some(series_id), Some(number)) => {
                Target::Numbered(parse_id(series_id, "series")?, number)
            }
            _ => {
                return Err(TalkerError::invalid_input(
                    "An issue id, or a series id and issue number, is required",
                ));
            }
        };

        let conn = self.open()?;
        let id = match target {
            Target::Issue(id) => id,
            Target::Numbered(series_id, number) => {
                match db::find_issue_id(&conn, series_id, number, self.settings.nn_is_issue_one)? {
                    Some(id) => id,
                    None => {
                        log::debug!("Issue {number} not found in series {series_id}");
                        return Ok(None);
                    }
                }
            }
        };

        let Some(issue) = self.issue_record(&conn, id)? else {
            log::debug!("Issue ID {id} not found");
            return Ok(None);
        };
        let series = self.series_for_issue(&conn, &issue)?;
        Ok(Some(map_issue(&issue, &series, &self.settings)))
    }

    /// Every issue of a series, one per issue number, in publication order.
    ///
    /// `None` when the series does not exist.
    pub fn fetch_issues_in_series(
        &self,
        series_id: &str,
    ) -> Result<Option<Vec<ComicMetadata>>, TalkerError> {
        let id = parse_id(series_id, "series")?;
        let conn = self.open()?;
        let Some(series) = self.series_record(&conn, id)? else {
            return Ok(None);
        };
        db::ensure_story_index(&conn)?;

        let issues = db::issues_in_series(&conn, id)?;
        Ok(Some(
            issues
                .iter()
                .map(|issue| map_issue(issue, &series, &self.settings))
                .collect(),
        ))
    }

    /// Issues numbered `issue_number` in any of `series_ids`, optionally
    /// limited to `year`. Used for automatic matching.
    pub fn fetch_issues_by_series_issue_num_and_year(
        &self,
        series_ids: &[String],
        issue_number: &str,
        year: Option<i32>,
    ) -> Result<Vec<ComicMetadata>, TalkerError> {
        let issue_number = issue_number.trim();
        if issue_number.is_empty() {
            return Err(TalkerError::invalid_input("Issue number must not be empty"));
        }
        let ids = series_ids
            .iter()
            .map(|id| parse_id(id, "series"))
            .collect::<Result<Vec<_>, _>>()?;

        let conn = self.open()?;
        db::ensure_story_index(&conn)?;

        let mut results = Vec::new();
        for id in ids {
            let Some(series) = self.series_record(&conn, id)? else {
                log::debug!("Series {id} not found, skipping");
                continue;
            };
            let issues = db::issues_by_number_and_year(
                &conn,
                id,
                issue_number,
                year,
                self.settings.nn_is_issue_one,
            )?;
            for mut issue in issues {
                if self.settings.download_tag_covers {
                    self.attach_covers(&mut issue);
                }
                results.push(map_issue(&issue, &series, &self.settings));
            }
        }
        log::info!(
            "{} issues numbered {issue_number} in {} series",
            results.len(),
            series_ids.len()
        );
        Ok(results)
    }

    // ── Records ─────────────────────────────────────────────────────────────

    fn open(&self) -> Result<Connection, TalkerError> {
        let path = self
            .settings
            .db_file
            .as_deref()
            .ok_or(SchemaError::EmptyPath)?;
        Ok(db::open_database(path)?)
    }

    /// A cached record is reusable unless GUI covers are wanted and it has none.
    fn reusable(&self, complete: bool, covers_downloaded: bool) -> bool {
        complete && (!self.settings.download_gui_covers || covers_downloaded)
    }

    fn series_record(&self, conn: &Connection, id: i64) -> Result<Option<GcdSeries>, TalkerError> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get_series(id)? {
                if self.reusable(cached.complete, cached.data.cover_downloaded) {
                    log::debug!("Series {id} served from cache");
                    return Ok(Some(cached.data));
                }
            }
        }

        let Some(mut series) = db::get_series(conn, id)? else {
            return Ok(None);
        };
        if self.settings.download_gui_covers {
            if let Some(covers) = self.series_covers(conn, id)? {
                series.image = covers.cover;
                series.cover_downloaded = true;
            }
        }

        if let Some(cache) = &self.cache {
            cache.add_series(&series, true)?;
        }
        Ok(Some(series))
    }

    fn issue_record(&self, conn: &Connection, id: i64) -> Result<Option<GcdIssue>, TalkerError> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get_issue(id)? {
                if self.reusable(cached.complete, cached.data.covers_downloaded) {
                    log::debug!("Issue {id} served from cache");
                    return Ok(Some(cached.data));
                }
            }
        }

        db::ensure_story_index(conn)?;
        let Some(mut issue) = db::get_issue(conn, id)? else {
            return Ok(None);
        };
        issue.credits = db::issue_credits(conn, id, &issue.story_ids)?;
        if self.settings.download_gui_covers {
            self.attach_covers(&mut issue);
        }

        if let Some(cache) = &self.cache {
            cache.add_issue(&issue, true)?;
        }
        Ok(Some(issue))
    }

    fn series_for_issue(&self, conn: &Connection, issue: &GcdIssue) -> Result<GcdSeries, TalkerError> {
        match self.series_record(conn, issue.series_id)? {
            Some(series) => Ok(series),
            None => {
                log::warn!(
                    "Issue {} refers to missing series {}",
                    issue.id,
                    issue.series_id
                );
                Ok(GcdSeries {
                    id: issue.series_id,
                    ..Default::default()
                })
            }
        }
    }

    // ── Covers ──────────────────────────────────────────────────────────────

    /// Look up covers, logging and swallowing failures.
    fn covers_for(&self, issue_id: i64) -> Option<IssueCovers> {
        let source = self.covers.as_ref()?;
        match source.issue_covers(issue_id) {
            Ok(covers) => Some(covers),
            Err(e) => {
                log::warn!("Cover lookup for issue {issue_id} failed: {e}");
                None
            }
        }
    }

    fn attach_covers(&self, issue: &mut GcdIssue) {
        if let Some(covers) = self.covers_for(issue.id) {
            issue.image = covers.cover;
            issue.alt_image_urls = covers.variants;
            issue.covers_downloaded = true;
        }
    }

    /// The series cover is the cover of its first issue.
    fn series_covers(&self, conn: &Connection, series_id: i64) -> Result<Option<IssueCovers>, TalkerError> {
        if self.covers.is_none() {
            return Ok(None);
        }
        Ok(match db::first_issue_id(conn, series_id)? {
            Some(issue_id) => self.covers_for(issue_id),
            None => Some(IssueCovers::default()),
        })
    }
}

/// Parse a host-supplied id.
pub fn parse_id(id: &str, what: &str) -> Result<i64, TalkerError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| TalkerError::invalid_input(format!("Invalid {what} id '{id}'")))
}
