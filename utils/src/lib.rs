pub mod alloy;
pub mod blocks;
pub mod error;
pub mod reqwest;
pub mod serde;
pub mod subgraph;

pub use error::{Result, UtilsError as Error};

pub use blocks::{rpc_resolver, BlockResolver, ExplorerBlockResolver, RpcBlockResolver};
pub use crate::reqwest::Reqwest;
pub use subgraph::{ReserveSource, SubgraphClient};
