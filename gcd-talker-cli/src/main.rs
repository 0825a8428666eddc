//! gcd-talker CLI
//!
//! Command-line front-end for looking up comic metadata in a local Grand
//! Comics Database dump. Every talker operation is available as a command,
//! and `request` answers the JSON contract a tagging host speaks.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gcd_talker_lib::{GcdTalker, MetadataCache, SeriesQuery, TalkerSettings};
use gcd_talker_scraper::GcdCoverClient;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Output options shared by the lookup commands.
#[derive(Clone, Copy)]
pub(crate) struct Output {
    pub json: bool,
}

/// Log an empty line.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();
    let machine = cli.json || matches!(cli.command, Commands::Request { .. });

    if let Err(e) = logging::init_logger(cli.quiet, cli.verbose, cli.logfile.as_deref(), machine)
    {
        eprintln!("Failed to set up logging: {e}");
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e
        );
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Status { ref path } => {
            let talker = build_talker(&cli)?;
            commands::lookup::run_status(&talker, path.as_deref(), out)
        }
        Commands::Search {
            ref name,
            year,
            ref issue,
            literal,
        } => {
            let talker = build_talker(&cli)?;
            let query = SeriesQuery {
                name: name.clone(),
                year,
                issue_number: issue.clone(),
                literal,
            };
            commands::lookup::run_search(&talker, &query, out)
        }
        Commands::Series { ref series_id } => {
            let talker = build_talker(&cli)?;
            commands::lookup::run_series(&talker, series_id, out)
        }
        Commands::Issues { ref series_id } => {
            let talker = build_talker(&cli)?;
            commands::lookup::run_issues(&talker, series_id, out)
        }
        Commands::Issue { ref target } => {
            let talker = build_talker(&cli)?;
            commands::lookup::run_issue(&talker, target, out)
        }
        Commands::Match {
            ref series_ids,
            ref number,
            year,
        } => {
            let talker = build_talker(&cli)?;
            commands::lookup::run_match(&talker, series_ids, number, year, out)
        }
        Commands::Request { ref json } => {
            let talker = build_talker(&cli)?;
            commands::request::run_request(&talker, json.as_deref())
        }
        Commands::Config { ref action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.db.clone()),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Set { key, value } => commands::config::run_config_set(key, value),
        },
        Commands::Cache { ref action } => match action {
            CacheAction::Path => commands::cache::run_cache_path(),
            CacheAction::Clear => commands::cache::run_cache_clear(),
        },
        Commands::Info => {
            commands::info::run_info();
            Ok(())
        }
    }
}

/// Build a talker from the settings file, `GCD_TALKER_DB`, and the global
/// flags.
fn build_talker(cli: &Cli) -> Result<GcdTalker, CliError> {
    let mut settings = TalkerSettings::load()
        .map_err(|e| CliError::config(format!("Failed to load settings: {e}")))?;
    settings.resolve_db_file(cli.db.clone());
    if cli.covers {
        settings.download_gui_covers = true;
    }
    let wants_covers = settings.download_gui_covers || settings.download_tag_covers;

    let mut talker = GcdTalker::new(settings);

    if !cli.no_cache {
        match MetadataCache::open_default() {
            Ok(cache) => talker = talker.with_cache(cache),
            Err(e) => log::warn!("Result cache unavailable, continuing without it: {e}"),
        }
    }

    if wants_covers {
        match GcdCoverClient::new() {
            Ok(client) => talker = talker.with_cover_source(Box::new(client)),
            Err(e) => log::warn!("Cover lookups disabled: {e}"),
        }
    }

    Ok(talker)
}
