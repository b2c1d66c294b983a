use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("duplicate class in table: {0}")]
    DuplicateClass(String),
    #[error("invalid method `{name}` in class {class}: {source}")]
    InvalidMethod {
        class: String,
        name: String,
        #[source]
        source: Box<Error>,
    },
    #[error("failed to read class table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse class table: {0}")]
    Json(#[from] serde_json::Error),
}
