use thiserror::Error;

use crate::export::ExportError;
use crate::ingestion::IngestionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Forecast task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError)
}
