//! Lending protocol subgraph client.

use std::future::Future;

use alloy::primitives::BlockNumber;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tvl_common::{Chain, Protocol, UserReserveRecord};

use crate::Reqwest;

/// Largest page The Graph serves for a single entity query.
pub const PAGE_SIZE: usize = 1000;

const USER_RESERVES_QUERY: &str = r#"
query UserReserves($block: Int!, $first: Int!, $lastId: String!) {
  userReserves(
    block: { number: $block }
    first: $first
    where: { id_gt: $lastId }
    orderBy: id
    orderDirection: asc
  ) {
    id
    user { id }
    reserve { underlyingAsset }
    currentATokenBalance
    lastUpdateTimestamp
  }
}
"#;

/// Source of user reserve positions for a protocol deployment.
pub trait ReserveSource {
    /// Every user reserve of `protocol` on `chain` as of `block`, in source order.
    fn user_reserves(
        &self,
        chain: Chain,
        protocol: Protocol,
        block: BlockNumber,
    ) -> impl Future<Output = crate::Result<Vec<UserReserveRecord>>>;
}

pub fn subgraph_url(chain: Chain, protocol: Protocol) -> crate::Result<&'static str> {
    match (chain, protocol) {
        (Chain::Zircuit, Protocol::ZeroLend) => Ok(
            "https://api.goldsky.com/api/public/project_clsk1wzatdsls01wchl2e4n0y/subgraphs/zerolend-zircuit/1.0.0/gn",
        ),
        #[allow(unreachable_patterns)]
        _ => Err(crate::Error::SubgraphNotConfigured { chain, protocol }),
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserReservesPage {
    user_reserves: Vec<UserReserveRecord>,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> crate::Result<T> {
        if !self.errors.is_empty() {
            return Err(crate::Error::SubgraphQuery {
                errors: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        self.data.ok_or(crate::Error::SubgraphMissingData)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubgraphClient {
    client: Client,
}

impl SubgraphClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn user_reserves_page(
        &self,
        url: &str,
        block: BlockNumber,
        last_id: &str,
    ) -> crate::Result<Vec<UserReserveRecord>> {
        let request = GraphQlRequest {
            query: USER_RESERVES_QUERY,
            variables: json!({
                "block": block,
                "first": PAGE_SIZE,
                "lastId": last_id,
            }),
        };

        let response = Reqwest::post(&self.client, url)?
            .json_body(&request)
            .receive_json::<GraphQlResponse<UserReservesPage>>()
            .await?;

        Ok(response.into_data()?.user_reserves)
    }
}

impl ReserveSource for SubgraphClient {
    async fn user_reserves(
        &self,
        chain: Chain,
        protocol: Protocol,
        block: BlockNumber,
    ) -> crate::Result<Vec<UserReserveRecord>> {
        let url = subgraph_url(chain, protocol)?;

        let reserves = paginate(move |last_id| async move {
            self.user_reserves_page(url, block, &last_id).await
        })
        .await?;

        tracing::debug!(%chain, %protocol, block, count = reserves.len(), "fetched user reserves");
        Ok(reserves)
    }
}

/// Pulls pages through an `id_gt` cursor until one comes back short.
///
/// The cursor starts empty and then holds the `id` of the last record seen.
async fn paginate<F, Fut>(mut fetch_page: F) -> crate::Result<Vec<UserReserveRecord>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = crate::Result<Vec<UserReserveRecord>>>,
{
    let mut reserves = Vec::new();
    let mut last_id = String::new();
    loop {
        let page = fetch_page(last_id.clone()).await?;
        let page_len = page.len();
        tracing::debug!(page_len, %last_id, "fetched user reserves page");

        if let Some(last) = page.last() {
            last_id = last.id.clone();
        }
        reserves.extend(page);

        if page_len < PAGE_SIZE {
            break;
        }
    }

    Ok(reserves)
}
