//! JSON request/response contract with the host.
//!
//! Requests are tagged by `op`, responses by `response`:
//!
//! ```json
//! {"op": "fetch_comic_data", "issue_id": "12345"}
//! {"response": "issue", "issue": {"issue_id": "12345", ...}}
//! ```

use std::path::PathBuf;

use gcd_talker_catalog::{ComicMetadata, ComicSeries};
use serde::{Deserialize, Serialize};

use crate::error::TalkerError;
use crate::search::SeriesQuery;
use crate::talker::GcdTalker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TalkerRequest {
    CheckStatus {
        #[serde(default)]
        db_file: Option<PathBuf>,
    },
    SearchSeries(SeriesQuery),
    FetchSeries {
        series_id: String,
    },
    FetchComicData {
        #[serde(default)]
        issue_id: Option<String>,
        #[serde(default)]
        series_id: Option<String>,
        #[serde(default)]
        issue_number: Option<String>,
    },
    FetchIssuesInSeries {
        series_id: String,
    },
    FetchIssuesByNumberAndYear {
        series_ids: Vec<String>,
        issue_number: String,
        #[serde(default)]
        year: Option<i32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum TalkerResponse {
    Status { message: String, ok: bool },
    SeriesList { series: Vec<ComicSeries> },
    Series { series: ComicSeries },
    Issues { issues: Vec<ComicMetadata> },
    Issue { issue: ComicMetadata },
    NotFound { message: String },
    Error { code: u8, message: String },
}

impl TalkerResponse {
    pub fn error(err: &TalkerError) -> Self {
        TalkerResponse::Error {
            code: err.code(),
            message: err.to_string(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        TalkerResponse::NotFound {
            message: message.into(),
        }
    }
}

/// Run one request against the talker. Never fails: errors become
/// `TalkerResponse::Error`.
pub fn handle_request(talker: &GcdTalker, request: &TalkerRequest) -> TalkerResponse {
    match dispatch(talker, request) {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Request failed: {e}");
            TalkerResponse::error(&e)
        }
    }
}

/// Parse a JSON request and run it. Malformed JSON is an invalid-input error.
pub fn handle_json(talker: &GcdTalker, json: &str) -> TalkerResponse {
    match serde_json::from_str::<TalkerRequest>(json) {
        Ok(request) => handle_request(talker, &request),
        Err(e) => TalkerResponse::error(&TalkerError::invalid_input(format!(
            "Malformed request: {e}"
        ))),
    }
}

fn dispatch(talker: &GcdTalker, request: &TalkerRequest) -> Result<TalkerResponse, TalkerError> {
    Ok(match request {
        TalkerRequest::CheckStatus { db_file } => {
            let status = talker.check_status(db_file.as_deref());
            TalkerResponse::Status {
                message: status.message,
                ok: status.ok,
            }
        }
        TalkerRequest::SearchSeries(query) => TalkerResponse::SeriesList {
            series: talker.search_for_series(query)?,
        },
        TalkerRequest::FetchSeries { series_id } => match talker.fetch_series(series_id)? {
            Some(series) => TalkerResponse::Series { series },
            None => TalkerResponse::not_found(format!("Series ID {series_id} not found")),
        },
        TalkerRequest::FetchComicData {
            issue_id,
            series_id,
            issue_number,
        } => match talker.fetch_comic_data(
            issue_id.as_deref(),
            series_id.as_deref(),
            issue_number.as_deref(),
        )? {
            Some(issue) => TalkerResponse::Issue { issue },
            None => TalkerResponse::not_found("Issue not found"),
        },
        TalkerRequest::FetchIssuesInSeries { series_id } => {
            match talker.fetch_issues_in_series(series_id)? {
                Some(issues) => TalkerResponse::Issues { issues },
                None => TalkerResponse::not_found(format!("Series ID {series_id} not found")),
            }
        }
        TalkerRequest::FetchIssuesByNumberAndYear {
            series_ids,
            issue_number,
            year,
        } => TalkerResponse::Issues {
            issues: talker.fetch_issues_by_series_issue_num_and_year(
                series_ids,
                issue_number,
                *year,
            )?,
        },
    })
}
