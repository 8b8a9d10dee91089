use async_trait::async_trait;

use crate::error::FetchError;

/// One symbol's 24h ticker as reported by the market-data collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    pub last_price: f64,
    pub price_change_percent: f64,
}

/// Seam for the external market-data collaborator. Failures are per-symbol.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the 24h ticker for a pair symbol such as "BTCUSDT".
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, FetchError>;
}
