use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        RwLock,
    },
};

use crate::level::Level;

pub const LOG_DIR_ENV: &str = "PRINTLOG_DIR";

#[cfg(not(target_os = "windows"))]
pub fn home_dir() -> PathBuf {
    std::env::var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

#[cfg(target_os = "windows")]
pub fn home_dir() -> PathBuf {
    std::env::var("USERPROFILE").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

/// `$PRINTLOG_DIR` if set, otherwise `~/Documents/Print/`.
pub fn default_log_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV).map_or_else(
        |_| home_dir().join("Documents").join("Print"),
        PathBuf::from,
    )
}

/// Live settings of a [`crate::Printer`]. Every field may be read or changed
/// from any thread while logging is in progress; a change applies to calls
/// made after it.
#[derive(Debug)]
pub struct Config {
    minimum_level: AtomicU8,
    show_source_location: AtomicBool,
    show_timestamp: AtomicBool,
    console_enabled: AtomicBool,
    log_directory: RwLock<PathBuf>,
}

impl Config {
    pub fn new(log_directory: impl Into<PathBuf>) -> Self {
        Self {
            minimum_level: AtomicU8::new(Level::Debug.rank()),
            show_source_location: AtomicBool::new(false),
            show_timestamp: AtomicBool::new(false),
            console_enabled: AtomicBool::new(cfg!(debug_assertions)),
            log_directory: RwLock::new(log_directory.into()),
        }
    }

    pub fn minimum_level(&self) -> Level {
        Level::from_rank(self.minimum_level.load(Ordering::Relaxed))
    }

    pub fn set_minimum_level(&self, level: Level) {
        self.minimum_level.store(level.rank(), Ordering::Relaxed);
    }

    pub fn show_source_location(&self) -> bool {
        self.show_source_location.load(Ordering::Relaxed)
    }

    pub fn set_show_source_location(&self, show: bool) {
        self.show_source_location.store(show, Ordering::Relaxed);
    }

    pub fn show_timestamp(&self) -> bool {
        self.show_timestamp.load(Ordering::Relaxed)
    }

    pub fn set_show_timestamp(&self, show: bool) {
        self.show_timestamp.store(show, Ordering::Relaxed);
    }

    pub fn console_enabled(&self) -> bool {
        self.console_enabled.load(Ordering::Relaxed)
    }

    pub fn set_console_enabled(&self, enabled: bool) {
        self.console_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn log_directory(&self) -> PathBuf {
        match self.log_directory.read() {
            Ok(dir) => dir.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_log_directory(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        match self.log_directory.write() {
            Ok(mut current) => *current = dir,
            Err(poisoned) => *poisoned.into_inner() = dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_log_dir())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn defaults_match_a_fresh_process() {
        let config = Config::new("/tmp/print");

        assert_eq!(config.minimum_level(), Level::Debug);
        assert!(!config.show_source_location());
        assert!(!config.show_timestamp());
        assert_eq!(config.console_enabled(), cfg!(debug_assertions));
        assert_eq!(config.log_directory(), PathBuf::from("/tmp/print"));
    }

    #[test]
    fn updates_are_visible_across_threads() {
        let config = Arc::new(Config::new("/tmp/a"));

        let writer = {
            let config = config.clone();
            std::thread::spawn(move || {
                config.set_minimum_level(Level::Error);
                config.set_show_timestamp(true);
                config.set_log_directory("/tmp/b");
            })
        };
        writer.join().unwrap();

        assert_eq!(config.minimum_level(), Level::Error);
        assert!(config.show_timestamp());
        assert_eq!(config.log_directory(), PathBuf::from("/tmp/b"));
    }

    #[test]
    fn default_dir_ends_with_print() {
        if std::env::var(LOG_DIR_ENV).is_err() {
            assert!(default_log_dir().ends_with("Documents/Print"));
        }
    }
}
