mod config;
mod error;
#[cfg(test)]
mod fakes;
mod mapper;
mod pipeline;
mod writer;

pub use config::{BlockSource, SnapshotConfig};
pub use error::{Error, Result};
pub use mapper::map_user_reserves;
pub use pipeline::{run, snapshot, SnapshotReport};
pub use writer::write_csv;
