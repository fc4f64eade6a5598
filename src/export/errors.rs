use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export error: [{labels}] date(s) but [{values}] value(s)")]
    LengthMismatch {
        labels: usize,
        values: usize
    },
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export error: output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error)
}
