use tvl_common::{CsvRow, UserReserveRecord};
use tvl_utils::BlockResolver;

/// Turns reserves into CSV rows, resolving each reserve's last update
/// timestamp to a block one record at a time.
///
/// The first parse or resolution failure aborts the whole mapping.
pub async fn map_user_reserves<R: BlockResolver>(
    reserves: &[UserReserveRecord],
    resolver: &R,
) -> crate::Result<Vec<CsvRow>> {
    let mut rows = Vec::with_capacity(reserves.len());

    for reserve in reserves {
        let timestamp = reserve.last_update_timestamp()?;
        let block = resolver.block_by_timestamp(timestamp).await?;
        rows.push(CsvRow::new(reserve, block, timestamp));
    }

    Ok(rows)
}
