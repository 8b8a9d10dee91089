use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::traits::balance_provider::BalanceProvider;
use crate::utils::helper::format_units;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC balance provider for EVM-style chains.
///
/// Issues `eth_getBalance` against the configured endpoint and converts the
/// hex wei quantity into a native-unit decimal string.
pub struct EvmRpcProvider {
    client: Client,
    endpoint: String,
    native_decimals: u32,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

impl EvmRpcProvider {
    /// Create a provider for an endpoint whose native unit has the given
    /// number of decimals (18 for ether-style chains).
    pub fn new(endpoint: impl Into<String>, native_decimals: u32) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoint: endpoint.into(), native_decimals })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BalanceProvider for EvmRpcProvider {
    async fn fetch_native_balance(&self, address: &str) -> Result<String, FetchError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBalance",
            "params": [address, "latest"],
        });

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: JsonRpcResponse = response.json().await?;

        if let Some(err) = body.error {
            return Err(FetchError::Rpc { code: err.code, message: err.message });
        }

        let quantity = body
            .result
            .ok_or_else(|| FetchError::Malformed("response carries neither result nor error".to_string()))?;
        let raw = parse_hex_quantity(&quantity)?;
        let amount = format_units(raw, self.native_decimals);

        debug!(%address, %amount, "fetched native balance");
        Ok(amount)
    }
}

fn parse_hex_quantity(quantity: &str) -> Result<u128, FetchError> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    u128::from_str_radix(digits, 16)
        .map_err(|e| FetchError::Malformed(format!("bad hex quantity {:?}: {}", quantity, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_hex_quantity("0xde0b6b3a7640000").unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("not-hex").is_err());
    }
}
