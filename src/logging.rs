//! Structured logging setup. Both front ends own the terminal, so events go
//! to a log file when one is configured and are only written to stderr when
//! the caller says the terminal can take them.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Pick where log lines go: the file if given (appended), otherwise stderr
/// when allowed, otherwise nowhere.
pub fn log_writer(file: Option<&Path>, stderr_allowed: bool) -> io::Result<Option<BoxMakeWriter>> {
    if let Some(path) = file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        return Ok(Some(BoxMakeWriter::new(Mutex::new(file))));
    }
    if stderr_allowed {
        return Ok(Some(BoxMakeWriter::new(io::stderr)));
    }
    Ok(None)
}

/// Install the global subscriber. Does nothing when `writer` is `None` or
/// the level is `OFF`.
pub fn initialize_logging(level: LevelFilter, writer: Option<BoxMakeWriter>, ansi: bool) {
    let Some(writer) = writer else {
        return;
    };
    if level == LevelFilter::OFF {
        return;
    }

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_writer_without_file_or_stderr() {
        assert!(log_writer(None, false).unwrap().is_none());
    }

    #[test]
    fn test_stderr_writer_when_allowed() {
        assert!(log_writer(None, true).unwrap().is_some());
    }

    #[test]
    fn test_file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect_four.log");
        assert!(log_writer(Some(&path), false).unwrap().is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_file_writer_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("game.log");
        assert!(log_writer(Some(&path), true).is_err());
    }
}
