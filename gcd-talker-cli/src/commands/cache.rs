use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gcd_talker_lib::{MetadataCache, default_cache_dir};

use crate::CliError;

/// Print the cache location and how many entries it holds.
pub(crate) fn run_cache_path() -> Result<(), CliError> {
    let dir = default_cache_dir()?;
    log::info!("{}", dir.display());

    if dir.exists() {
        let cache = MetadataCache::open(&dir)?;
        let stats = cache.stats()?;
        log::info!(
            "  {} series, {} issues cached",
            stats.series,
            stats.issues,
        );
    } else {
        log::info!(
            "  {}",
            "(no cache yet)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Remove every cached entry.
pub(crate) fn run_cache_clear() -> Result<(), CliError> {
    let dir = default_cache_dir()?;
    if !dir.exists() {
        log::info!(
            "{}",
            "Cache is already empty.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let cache = MetadataCache::open(&dir)?;
    let stats = cache.stats()?;
    cache.clear()?;
    log::info!(
        "{} Cache cleared ({} series, {} issues removed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.series,
        stats.issues,
    );
    Ok(())
}
