//! Value types shared by the encoder and its callers

pub mod amount;
pub mod errors;

pub use amount::TransactionAmount;
pub use errors::{AmountError, KeyError, StoreError};
