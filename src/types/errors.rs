use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: ensure that there are no more than {0} decimal places")]
    TooManyDecimalPlaces(u32),
    #[error("Amount error: ensure that there are no more than {0} digits before the decimal point")]
    TooManyDigits(u32),
    #[error("Amount error: value must not be negative")]
    Negative
}
