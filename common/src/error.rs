use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Last update timestamp '{0}' is not a valid unix timestamp. (Error: {1})")]
    InvalidTimestamp(String, ParseIntError),
}
