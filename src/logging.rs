// Conditional logging macros - only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Default log location: `<cache dir>/shrugman/shrugman.log`.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("shrugman").join("shrugman.log"))
}

/// Where to log, if anywhere. An explicit `--log-file` always wins; without
/// one, logging goes to [`default_log_path`] only when `RUST_LOG` is set.
#[must_use]
pub fn log_path(explicit: Option<PathBuf>, rust_log_set: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path),
        None if rust_log_set => default_log_path(),
        None => None,
    }
}

/// Send `log` output to `path`. The terminal belongs to the game, so nothing
/// is written to stdout or stderr. Level comes from `RUST_LOG` (default `info`).
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert_eq!(path.file_name().unwrap(), "shrugman.log");
            assert!(path.parent().unwrap().ends_with("shrugman"));
        }
    }

    #[test]
    fn test_log_path_off_by_default() {
        assert_eq!(log_path(None, false), None);
        assert_eq!(log_path(None, true), default_log_path());
        let explicit = PathBuf::from("/tmp/game.log");
        assert_eq!(log_path(Some(explicit.clone()), false), Some(explicit.clone()));
        assert_eq!(log_path(Some(explicit.clone()), true), Some(explicit));
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("shrugman_logging_test_{}", std::process::id()));
        let path = dir.join("nested").join("game.log");
        let _ = fs::remove_dir_all(&dir);

        // A logger may already be installed by another test; the file is
        // created either way.
        let _ = init(&path);
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
