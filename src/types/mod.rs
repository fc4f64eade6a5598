mod amount;
mod coerce;
mod errors;

pub use amount::Amount;
pub use coerce::{coerce_amount, coerce_date};
pub use errors::AmountError;

pub type UserId = u64;
pub type RecordId = u64;
pub type SessionId = String;
