use alloy::primitives::BlockNumber;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// A user's position in one reserve, as indexed by the lending protocol subgraph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReserveRecord {
    pub id: String,
    pub user: ReserveUser,
    pub reserve: ReserveAsset,
    /// Decimal string with arbitrary precision, copied verbatim into the CSV.
    #[serde(rename = "currentATokenBalance")]
    pub current_a_token_balance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub last_update_timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReserveUser {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveAsset {
    pub underlying_asset: String,
}

impl UserReserveRecord {
    /// Integer value of the leading digits, so "1718000000.0" reads as 1718000000.
    pub fn last_update_timestamp(&self) -> crate::Result<u64> {
        let raw = self.last_update_timestamp.trim_start();
        let unsigned = raw.strip_prefix('+').unwrap_or(raw);
        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());

        unsigned[..digits_end]
            .parse::<u64>()
            .map_err(|e| Error::InvalidTimestamp(self.last_update_timestamp.clone(), e))
    }
}

/// One line of the snapshot CSV. Field order is the column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub user: String,
    pub token_address: String,
    /// Block at which the reserve was last updated, not the snapshot block.
    pub block: BlockNumber,
    pub token_balance: String,
    pub timestamp: u64,
}

impl CsvRow {
    pub const HEADERS: [&'static str; 5] =
        ["user", "token_address", "block", "token_balance", "timestamp"];

    pub fn new(reserve: &UserReserveRecord, block: BlockNumber, timestamp: u64) -> Self {
        Self {
            user: reserve.user.id.clone(),
            token_address: reserve.reserve.underlying_asset.clone(),
            block,
            token_balance: reserve.current_a_token_balance.clone(),
            timestamp,
        }
    }
}

// Subgraphs type `lastUpdateTimestamp` as Int, some gateways send it quoted.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str) -> UserReserveRecord {
        UserReserveRecord {
            id: "0xabc0xdef".to_string(),
            user: ReserveUser {
                id: "0xabc".to_string(),
            },
            reserve: ReserveAsset {
                underlying_asset: "0xdef".to_string(),
            },
            current_a_token_balance: "123456789012345678901234567890".to_string(),
            last_update_timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_deserialize_subgraph_entity() {
        let json = r#"{
            "id": "0xabc0xdef",
            "user": { "id": "0xabc" },
            "reserve": { "underlyingAsset": "0xdef" },
            "currentATokenBalance": "123456789012345678901234567890",
            "lastUpdateTimestamp": 1718000000
        }"#;
        let parsed: UserReserveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record("1718000000"));

        let quoted = json.replace("1718000000", "\"1718000000\"");
        let parsed: UserReserveRecord = serde_json::from_str(&quoted).unwrap();
        assert_eq!(parsed.last_update_timestamp, "1718000000");
    }

    #[test]
    fn test_last_update_timestamp() {
        assert_eq!(record("1718000000").last_update_timestamp().unwrap(), 1718000000);
        assert_eq!(record(" 42 ").last_update_timestamp().unwrap(), 42);
        assert!(matches!(
            record("").last_update_timestamp(),
            Err(Error::InvalidTimestamp(s, _)) if s.is_empty()
        ));
        assert!(record("soon").last_update_timestamp().is_err());
        assert!(record("-1").last_update_timestamp().is_err());
        assert!(record("99999999999999999999999").last_update_timestamp().is_err());
    }

    #[test]
    fn test_last_update_timestamp_reads_leading_digits() {
        assert_eq!(record("1718000000.0").last_update_timestamp().unwrap(), 1718000000);
        assert_eq!(record("12.5").last_update_timestamp().unwrap(), 12);
        assert_eq!(record("+1718000000").last_update_timestamp().unwrap(), 1718000000);
        assert_eq!(record("1718000000abc").last_update_timestamp().unwrap(), 1718000000);
    }

    #[test]
    fn test_csv_row_copies_balance_verbatim() {
        let row = CsvRow::new(&record("1718000000"), 2_600_000, 1718000000);
        assert_eq!(row.user, "0xabc");
        assert_eq!(row.token_address, "0xdef");
        assert_eq!(row.block, 2_600_000);
        assert_eq!(row.token_balance, "123456789012345678901234567890");
        assert_eq!(row.timestamp, 1718000000);
    }
}
