use std::path::PathBuf;

/// Errors raised by stores and the saved-edit repository.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed saved edits: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("no saved-edit ids left after the largest stored id")]
    IdsExhausted,
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
