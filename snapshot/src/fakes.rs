//! In-memory collaborators for pipeline tests.

use std::{cell::RefCell, collections::HashMap};

use alloy::primitives::BlockNumber;
use tvl_common::{Chain, Protocol, ReserveAsset, ReserveUser, UserReserveRecord};
use tvl_utils::{BlockResolver, ReserveSource};

pub fn reserve(user: &str, token: &str, balance: &str, timestamp: &str) -> UserReserveRecord {
    UserReserveRecord {
        id: format!("{user}{token}"),
        user: ReserveUser {
            id: user.to_string(),
        },
        reserve: ReserveAsset {
            underlying_asset: token.to_string(),
        },
        current_a_token_balance: balance.to_string(),
        last_update_timestamp: timestamp.to_string(),
    }
}

pub struct FakeSource {
    reserves: Option<Vec<UserReserveRecord>>,
    requests: RefCell<Vec<(Chain, Protocol, BlockNumber)>>,
}

impl FakeSource {
    pub fn returning(reserves: Vec<UserReserveRecord>) -> Self {
        Self {
            reserves: Some(reserves),
            requests: RefCell::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reserves: None,
            requests: RefCell::default(),
        }
    }

    pub fn requests(&self) -> Vec<(Chain, Protocol, BlockNumber)> {
        self.requests.borrow().clone()
    }
}

impl ReserveSource for FakeSource {
    async fn user_reserves(
        &self,
        chain: Chain,
        protocol: Protocol,
        block: BlockNumber,
    ) -> tvl_utils::Result<Vec<UserReserveRecord>> {
        self.requests.borrow_mut().push((chain, protocol, block));
        self.reserves
            .clone()
            .ok_or_else(|| tvl_utils::Error::SubgraphQuery {
                errors: vec!["indexer unavailable".to_string()],
            })
    }
}

pub struct FakeResolver {
    blocks: HashMap<u64, BlockNumber>,
    calls: RefCell<Vec<u64>>,
}

impl FakeResolver {
    pub fn new(blocks: impl IntoIterator<Item = (u64, BlockNumber)>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
            calls: RefCell::default(),
        }
    }

    pub fn calls(&self) -> Vec<u64> {
        self.calls.borrow().clone()
    }
}

impl BlockResolver for FakeResolver {
    async fn block_by_timestamp(&self, timestamp: u64) -> tvl_utils::Result<BlockNumber> {
        self.calls.borrow_mut().push(timestamp);
        self.blocks
            .get(&timestamp)
            .copied()
            .ok_or(tvl_utils::Error::TimestampOutOfRange { timestamp })
    }
}
