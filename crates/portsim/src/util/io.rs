//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path with `.tmp` appended to the file name
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// A partially written report never replaces an existing one: the content
/// goes to `<name>.tmp` first and is then renamed over the target.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("report.json"), &json)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        atomic_write(&path, "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");

        // Temp file should not exist
        assert!(!dir.path().join("report.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path(Path::new("/out/report.json")),
            PathBuf::from("/out/report.json.tmp")
        );
    }
}
