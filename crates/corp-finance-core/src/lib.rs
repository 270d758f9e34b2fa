pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "ma")]
pub mod ma;

#[cfg(feature = "venture")]
pub mod venture;

pub use error::CorpFinanceError;
pub use types::*;

/// Standard result type for all corp-finance operations
pub type CorpFinanceResult<T> = Result<T, CorpFinanceError>;
