//! Logger setup.
//!
//! Normal command output goes through `log::info!`, so `--quiet` hides it and
//! `--logfile` captures it. Machine-readable modes log to stderr instead so
//! stdout carries only JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Console stream plus a log file that receives the same text without ANSI
/// escapes.
struct TeeWriter {
    stderr: bool,
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.stderr {
            io::stderr().write_all(buf)?;
        } else {
            io::stdout().write_all(buf)?;
        }
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.stderr {
            io::stderr().flush()?;
        } else {
            io::stdout().flush()?;
        }
        self.file.flush()
    }
}

/// Install the global logger. `RUST_LOG` overrides the level picked from the
/// flags.
pub(crate) fn init_logger(
    quiet: bool,
    verbose: bool,
    logfile: Option<&Path>,
    machine: bool,
) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet || machine {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error => writeln!(buf, "error: {}", record.args()),
            log::Level::Warn => writeln!(buf, "warning: {}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    // Problems opening the log file are reported once the logger is up.
    let mut file_error = None;
    let target = match logfile.map(File::create) {
        Some(Ok(file)) => Target::Pipe(Box::new(TeeWriter {
            stderr: machine,
            file,
        })),
        Some(Err(e)) => {
            file_error = Some(e);
            console_target(machine)
        }
        None => console_target(machine),
    };
    builder.target(target);
    builder.try_init().map_err(io::Error::other)?;

    if let (Some(e), Some(path)) = (file_error, logfile) {
        log::warn!("Could not open log file {}: {e}", path.display());
    }
    Ok(())
}

fn console_target(machine: bool) -> Target {
    if machine { Target::Stderr } else { Target::Stdout }
}
