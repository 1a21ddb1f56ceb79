//! Timestamp to block number resolution.
//!
//! A resolved block is the highest block whose timestamp is not after the
//! requested one.

use std::future::Future;

use alloy::{
    eips::BlockNumberOrTag,
    primitives::BlockNumber,
    providers::Provider,
};
use reqwest::Client;
use serde::Deserialize;
use tvl_common::Chain;

use crate::{alloy::StringExt, Reqwest};

pub trait BlockResolver {
    fn block_by_timestamp(&self, timestamp: u64)
        -> impl Future<Output = crate::Result<BlockNumber>>;
}

/// Resolves through an Etherscan/Blockscout compatible `getblocknobytime` endpoint.
#[derive(Clone, Debug)]
pub struct ExplorerBlockResolver {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: ExplorerResult,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExplorerResult {
    // blockscout
    Block {
        #[serde(rename = "blockNumber")]
        block_number: String,
    },
    // etherscan, also carries the error text when status is "0"
    Text(String),
    Other(serde_json::Value),
}

impl ExplorerResponse {
    fn into_block_number(self, timestamp: u64) -> crate::Result<BlockNumber> {
        if self.status != "1" {
            let message = match self.result {
                ExplorerResult::Text(detail) => format!("{} ({detail})", self.message),
                _ => self.message,
            };
            return Err(crate::Error::ExplorerLookupFailed { timestamp, message });
        }

        match self.result {
            ExplorerResult::Block { block_number } | ExplorerResult::Text(block_number) => {
                block_number
                    .trim()
                    .parse()
                    .map_err(|_| crate::Error::InvalidBlockNumber(block_number))
            }
            ExplorerResult::Other(value) => Err(crate::Error::ExplorerLookupFailed {
                timestamp,
                message: format!("unexpected result {value}"),
            }),
        }
    }
}

impl ExplorerBlockResolver {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn for_chain(chain: Chain) -> Self {
        Self::new(chain.explorer_api_url())
    }
}

impl BlockResolver for ExplorerBlockResolver {
    async fn block_by_timestamp(&self, timestamp: u64) -> crate::Result<BlockNumber> {
        let timestamp_param = timestamp.to_string();
        let response = Reqwest::get(&self.client, &self.api_url)?
            .query(&[
                ("module", "block"),
                ("action", "getblocknobytime"),
                ("timestamp", timestamp_param.as_str()),
                ("closest", "before"),
            ])
            .receive_json::<ExplorerResponse>()
            .await?;

        let block = response.into_block_number(timestamp)?;
        tracing::debug!(timestamp, block, "resolved block from explorer");
        Ok(block)
    }
}

/// Resolves by binary searching block headers over JSON-RPC.
#[derive(Clone, Debug)]
pub struct RpcBlockResolver<P> {
    provider: P,
}

impl<P: Provider> RpcBlockResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn block_timestamp(&self, number: BlockNumber) -> crate::Result<u64> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await?
            .ok_or(crate::Error::BlockNotFound(number))?;
        Ok(block.header.timestamp)
    }
}

/// Resolver backed by the chain's public RPC endpoint.
pub fn rpc_resolver(chain: Chain) -> crate::Result<RpcBlockResolver<impl Provider>> {
    Ok(RpcBlockResolver::new(chain.rpc_url().to_alloy_provider()?))
}

impl<P: Provider> BlockResolver for RpcBlockResolver<P> {
    async fn block_by_timestamp(&self, timestamp: u64) -> crate::Result<BlockNumber> {
        let latest = self.provider.get_block_number().await?;
        let block =
            search_block(latest, timestamp, |number| self.block_timestamp(number)).await?;
        tracing::debug!(timestamp, block, "resolved block over rpc");
        Ok(block)
    }
}

/// Highest block in `[0, latest]` with a timestamp at or before `timestamp`.
async fn search_block<F, Fut>(
    latest: BlockNumber,
    timestamp: u64,
    block_timestamp: F,
) -> crate::Result<BlockNumber>
where
    F: Fn(BlockNumber) -> Fut,
    Fut: Future<Output = crate::Result<u64>>,
{
    let latest_timestamp = block_timestamp(latest).await?;
    if timestamp > latest_timestamp {
        return Err(crate::Error::TimestampOutOfRange { timestamp });
    }
    if timestamp == latest_timestamp {
        return Ok(latest);
    }
    if block_timestamp(0).await? > timestamp {
        return Err(crate::Error::TimestampOutOfRange { timestamp });
    }

    // block_timestamp(low) <= timestamp < block_timestamp(high)
    let (mut low, mut high) = (0, latest);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if block_timestamp(mid).await? <= timestamp {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}
