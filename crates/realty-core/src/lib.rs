pub mod error;
pub mod types;

#[cfg(feature = "currency")]
pub mod currency;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "listings")]
pub mod listings;

pub use error::RealtyError;
pub use types::*;

/// Standard result type for all realty operations
pub type RealtyResult<T> = Result<T, RealtyError>;
