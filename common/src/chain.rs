use alloy::primitives::ChainId;
use strum_macros::{Display, EnumIter};

/// Chains a snapshot can be taken on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Chain {
    Zircuit,
}

impl Chain {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Chain::Zircuit => 48900,
        }
    }

    /// Base URL of the chain's Etherscan/Blockscout compatible explorer API.
    pub fn explorer_api_url(&self) -> &'static str {
        match self {
            Chain::Zircuit => "https://explorer.zircuit.com/api",
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Chain::Zircuit => "https://mainnet.zircuit.com",
        }
    }
}

/// Lending protocols with an indexed subgraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Protocol {
    #[strum(to_string = "zerolend")]
    ZeroLend,
}
