pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "interest")]
pub mod interest;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "investments")]
pub mod investments;

#[cfg(feature = "planning")]
pub mod planning;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "currency")]
pub mod currency;

pub use error::CalcError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
