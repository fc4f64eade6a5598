use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Error opening dataset at path: {path} | {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Dataset header is unreadable: {0}")]
    Header(#[from] csv::Error)
}
