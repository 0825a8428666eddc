//! Comic metadata model types, GCD field parsing, and publishing-format classification.
//!
//! This crate defines both sides of the adapter without any database
//! dependencies: the raw records read from a Grand Comics Database dump and
//! the normalized series/issue records the host tagging application expects.

pub mod fields;
pub mod format_parser;
pub mod issue_number;
pub mod types;

pub use fields::{parse_key_date, parse_price, split_characters, split_genres, KeyDate};
pub use format_parser::match_format;
pub use issue_number::IssueNumber;
pub use types::*;
