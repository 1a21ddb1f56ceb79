use std::path::PathBuf;

use tvl_utils::{
    rpc_resolver, BlockResolver, ExplorerBlockResolver, ReserveSource, SubgraphClient,
};

use crate::{map_user_reserves, write_csv, BlockSource, SnapshotConfig};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotReport {
    pub output_path: PathBuf,
    pub records: usize,
}

/// Runs fetch, map and write in sequence.
///
/// A failed fetch is logged and treated as an empty reserve set, so the CSV
/// is still written with only its header. Mapping and filesystem failures
/// are returned and nothing is written.
pub async fn run<S, R>(
    config: &SnapshotConfig,
    source: &S,
    resolver: &R,
) -> crate::Result<SnapshotReport>
where
    S: ReserveSource,
    R: BlockResolver,
{
    let block = config.block;
    let mut rows = Vec::new();

    match source
        .user_reserves(config.chain, config.protocol, block)
        .await
    {
        Ok(reserves) if reserves.is_empty() => {
            tracing::info!("No data found for block {block}");
        }
        Ok(reserves) => {
            tracing::info!(
                "Fetched {} user reserves at block {block}, resolving update blocks",
                reserves.len()
            );
            rows = map_user_reserves(&reserves, resolver).await?;
        }
        Err(err) => {
            tracing::error!("Error processing block {block}: {err}");
        }
    }

    let output_path = config.output_path();
    write_csv(&output_path, &rows)?;

    tracing::info!("CSV file has been written to: {}", output_path.display());
    tracing::info!("Total records: {}", rows.len());

    Ok(SnapshotReport {
        output_path,
        records: rows.len(),
    })
}

/// Runs the snapshot against the configured chain's subgraph and resolver.
pub async fn snapshot(config: &SnapshotConfig) -> crate::Result<SnapshotReport> {
    tracing::info!(
        chain = %config.chain,
        chain_id = config.chain.chain_id(),
        protocol = %config.protocol,
        block = config.block,
        "taking tvl snapshot"
    );

    let source = SubgraphClient::new();
    match config.block_source {
        BlockSource::Explorer => {
            let resolver = ExplorerBlockResolver::for_chain(config.chain);
            run(config, &source, &resolver).await
        }
        BlockSource::Rpc => {
            let resolver = rpc_resolver(config.chain)?;
            run(config, &source, &resolver).await
        }
    }
}
