use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log files larger than this are trimmed before a run appends to them (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Most recent bytes kept when trimming (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Drop all but the last `KEEP_SIZE` bytes once a log exceeds `MAX_LOG_SIZE`.
/// The kept tail starts on a line boundary.
fn trim_log_if_needed(log_path: &Path) -> std::io::Result<()> {
    let Ok(metadata) = fs::metadata(log_path) else {
        return Ok(());
    };
    if metadata.len() <= MAX_LOG_SIZE {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(metadata.len().saturating_sub(KEEP_SIZE)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    drop(file);

    let skip = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- log trimmed ---\n")?;
    file.write_all(&tail[skip..])?;
    Ok(())
}

/// Default filter when `RUST_LOG` is unset
fn default_filter(level: &str) -> String {
    format!("portsim={level},portsim_core=warn")
}

/// Initialize logging to stderr, or append to `log_file` when given.
///
/// `RUST_LOG` takes precedence over `level`. Stdout is reserved for the
/// JSON report.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Err(e) = trim_log_if_needed(path) {
                eprintln!("Warning: failed to trim log file: {e}");
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!(log_level = level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_filter_targets_both_crates() {
        assert_eq!(default_filter("debug"), "portsim=debug,portsim_core=warn");
    }

    #[test]
    fn test_small_log_is_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portsim.log");
        fs::write(&path, "one\ntwo\n").unwrap();

        trim_log_if_needed(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");

        // Missing file is not an error
        trim_log_if_needed(&dir.path().join("absent.log")).unwrap();
    }

    #[test]
    fn test_large_log_keeps_recent_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portsim.log");
        let line = "x".repeat(99) + "\n";
        let content = line.repeat((MAX_LOG_SIZE / 100 + 10) as usize) + "last line\n";
        fs::write(&path, &content).unwrap();

        trim_log_if_needed(&path).unwrap();
        let trimmed = fs::read_to_string(&path).unwrap();
        assert!(trimmed.len() as u64 <= KEEP_SIZE + 32);
        assert!(trimmed.starts_with("--- log trimmed ---\n"));
        assert!(trimmed.ends_with("last line\n"));
        // Every kept line is whole
        assert!(trimmed.lines().skip(1).all(|l| l.len() == 99 || l == "last line"));
    }
}
