use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Install a global subscriber that appends to `path`.
///
/// The terminal is in raw alternate-screen mode while the app runs, so
/// nothing is ever written to stdout or stderr.
pub fn init(filter: &str, path: &Path) -> Result<()> {
    let filter = EnvFilter::try_new(filter)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(Error::Logging)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn rejects_bad_filter_before_touching_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("app.log");

        assert_matches!(init("typerzone=notalevel", &path), Err(Error::LogFilter(_)));
        assert!(!path.exists());
    }

    // Installs the process-wide subscriber; no other test in this crate does.
    #[test]
    fn init_creates_log_file_and_writes_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("typerzone.log");

        init("info", &path).unwrap();
        assert!(path.exists());

        tracing::info!("log file smoke event");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("log file smoke event"));
    }
}
