use std::path::PathBuf;

/// Failures of a single job's write. None of them reach the caller of a
/// logging function, and none stop the writer.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed creating log directory {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed creating log file {}", path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed opening log file {} for append", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing to log file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing to console")]
    Console(#[source] std::io::Error),
}
