//! Grand Comics Database talker.
//!
//! Looks up comic series and issue metadata in a local GCD SQLite dump and
//! maps it into the records a comic tagging host expects. Frontends (the CLI,
//! or a host speaking the JSON contract in `request`) drive a [`GcdTalker`].

pub mod cache;
pub mod error;
pub mod mapping;
pub mod request;
pub mod search;
pub mod settings;
pub mod talker;

pub use cache::{CacheError, CacheStats, MetadataCache, default_cache_dir};
pub use error::TalkerError;
pub use mapping::{map_issue, map_series};
pub use request::{TalkerRequest, TalkerResponse, handle_json, handle_request};
pub use search::{Relevance, SeriesQuery, rank_series};
pub use settings::{TalkerSettings, settings_path};
pub use talker::GcdTalker;
