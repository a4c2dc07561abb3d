use std::path::PathBuf;

/// Errors from the infrastructure around a typing session.
///
/// Session logic itself has no failure path; these come from the store,
/// the filesystem and the config file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file malformed: {path}: {source}")]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
