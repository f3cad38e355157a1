use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use super::{Line, LogSink};
use crate::{clock, config::Config, error::SinkError};

/// Appends lines to `<log_directory>/<yyyy-MM-dd>.log`.
///
/// Nothing is cached between lines: the directory and file are checked,
/// opened and closed again for every write, so a directory that disappears
/// or becomes writable again is picked up by the next line.
pub struct DailyFileSink {
    config: Arc<Config>,
}

impl DailyFileSink {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn file_path(dir: &Path, line: &Line) -> PathBuf {
        dir.join(format!("{}.log", clock::format_file_date(&line.time)))
    }

    fn ensure_directory(dir: &Path) -> Result<(), SinkError> {
        if dir.is_dir() {
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|source| SinkError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn ensure_file(path: &Path) -> Result<(), SinkError> {
        if path.exists() {
            return Ok(());
        }

        // `create_new` so a file created concurrently by someone else is left alone.
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(SinkError::FileCreation {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl LogSink for DailyFileSink {
    fn write_line(&mut self, line: &Line) -> Result<(), SinkError> {
        let dir = self.config.log_directory();
        Self::ensure_directory(&dir)?;

        let path = Self::file_path(&dir, line);
        Self::ensure_file(&path)?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::FileOpen {
                path: path.clone(),
                source,
            })?;

        file.write_all(line.text.as_bytes())
            .map_err(|source| SinkError::Write { path, source })
    }
}
