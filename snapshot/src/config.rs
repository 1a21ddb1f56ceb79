use std::path::{Path, PathBuf};

use alloy::primitives::BlockNumber;
use tvl_common::{Chain, Protocol};

/// Block the reserve set is queried at.
pub const INITIAL_BLOCK: BlockNumber = 2662044;
pub const OUTPUT_DIR: &str = "out";
pub const OUTPUT_FILE_NAME: &str = "tvl-snapshot-zerolend.csv";

/// How reserve update timestamps are turned into block numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockSource {
    /// `getblocknobytime` on the chain explorer API
    #[default]
    Explorer,
    /// binary search over block headers on the chain RPC
    Rpc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotConfig {
    pub chain: Chain,
    pub protocol: Protocol,
    pub block: BlockNumber,
    /// Relative paths resolve against the working directory.
    pub output_dir: PathBuf,
    pub file_name: String,
    pub block_source: BlockSource,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            chain: Chain::Zircuit,
            protocol: Protocol::ZeroLend,
            block: INITIAL_BLOCK,
            output_dir: PathBuf::from(OUTPUT_DIR),
            file_name: OUTPUT_FILE_NAME.to_string(),
            block_source: BlockSource::default(),
        }
    }
}

impl SnapshotConfig {
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}
