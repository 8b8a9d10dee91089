use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::traits::market_provider::{MarketDataProvider, Ticker};

const BINANCE_TICKER_URL: &str = "https://api.binance.com/api/v3/ticker/24hr";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Market-data provider backed by the Binance 24hr ticker endpoint.
pub struct BinanceMarketData {
    client: Client,
    base_url: String,
}

/// Subset of the 24hr ticker payload this core consumes.
#[derive(Debug, Deserialize)]
struct Ticker24h {
    #[serde(rename = "lastPrice")]
    last_price: String,
    #[serde(rename = "priceChangePercent")]
    price_change_percent: String,
}

impl BinanceMarketData {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(BINANCE_TICKER_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketData {
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, FetchError> {
        let url = format!("{}?symbol={}", self.base_url, symbol);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Ticker24h = response.json().await?;
        let last_price = parse_decimal_field("lastPrice", &body.last_price)?;
        let price_change_percent =
            parse_decimal_field("priceChangePercent", &body.price_change_percent)?;

        debug!(%symbol, last_price, price_change_percent, "fetched ticker");
        Ok(Ticker { last_price, price_change_percent })
    }
}

fn parse_decimal_field(field: &str, value: &str) -> Result<f64, FetchError> {
    value
        .parse::<f64>()
        .map_err(|e| FetchError::Malformed(format!("{} {:?}: {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_ticker_payload() {
        let payload = r#"{
            "symbol": "BTCUSDT",
            "lastPrice": "67432.50000000",
            "priceChangePercent": "1.230",
            "volume": "12345.6"
        }"#;

        let ticker: Ticker24h = serde_json::from_str(payload).unwrap();
        assert_eq!(parse_decimal_field("lastPrice", &ticker.last_price).unwrap(), 67432.5);
        assert_eq!(
            parse_decimal_field("priceChangePercent", &ticker.price_change_percent).unwrap(),
            1.23
        );
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(parse_decimal_field("lastPrice", "n/a").is_err());
    }
}
