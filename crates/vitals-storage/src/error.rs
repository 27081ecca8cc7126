use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store not found: {path}")]
    NotFound { path: String },

    #[error("store is malformed: {0}")]
    Malformed(String),

    #[error("invalid record '{id}' in store: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
