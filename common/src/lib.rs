pub mod chain;
pub mod error;
pub mod reserve;

pub use chain::{Chain, Protocol};
pub use error::Error;
pub use reserve::{CsvRow, ReserveAsset, ReserveUser, UserReserveRecord};
pub type Result<T> = std::result::Result<T, Error>;
