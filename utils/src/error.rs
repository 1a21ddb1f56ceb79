use tvl_common::{Chain, Protocol};
use url::Url;

use crate::reqwest::{ReqwestErrorContext, ReqwestInnerError, ReqwestStage};

pub type Result<T> = std::result::Result<T, UtilsError>;

#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    #[error("Please check your internet connection, the URL seems to be unreachable: {0}")]
    Internet(Url),

    #[error("Request '{url}' failed at stage '{stage:?}' (Error='{inner:?}', Context='{context:?}')", url = context.url)]
    ReqwestFailed {
        stage: ReqwestStage,
        context: Box<ReqwestErrorContext>,
        inner: ReqwestInnerError,
    },

    #[error("Reqwest builder missing error context, this is a bug please report it.")]
    ReqwestErrorContextMissing,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse URL: {0}. (Error: {1:?})")]
    UrlParsingFailed(String, url::ParseError),

    #[error("No subgraph is configured for {protocol} on {chain}.")]
    SubgraphNotConfigured { chain: Chain, protocol: Protocol },

    #[error("Subgraph query failed: {}", errors.join("; "))]
    SubgraphQuery { errors: Vec<String> },

    #[error("Subgraph response has neither 'data' nor 'errors'.")]
    SubgraphMissingData,

    #[error("Explorer could not resolve timestamp {timestamp} to a block: {message}")]
    ExplorerLookupFailed { timestamp: u64, message: String },

    #[error("Block number '{0}' returned by the explorer is not an integer.")]
    InvalidBlockNumber(String),

    #[error("Timestamp {timestamp} is outside the range of indexed blocks.")]
    TimestampOutOfRange { timestamp: u64 },

    #[error("Block {0} was not returned by the RPC node.")]
    BlockNotFound(u64),

    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),
}
