use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("could not read suggestions from {path}: {source}")]
    Suggestions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
