mod dataset;
mod errors;

pub use dataset::{read_expense_dataset, read_expense_rows};
pub use errors::IngestionError;
