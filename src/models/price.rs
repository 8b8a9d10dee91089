use chrono::{DateTime, Utc};

use crate::traits::market_provider::Ticker;
use crate::utils::helper::{base_asset, format_change_percent, format_price};

/// Latest known price for one tracked symbol.
///
/// Keyed by the exchange pair symbol passed to the price feed (unique per
/// feed). A failed fetch for the symbol leaves its previous snapshot
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    /// Exchange pair symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// Last price, already formatted for display (4 fractional digits below
    /// 1000, thousands separators and 2 digits at or above it).
    pub price: String,
    /// 24h change in percent.
    pub change_percent: f64,
    pub last_updated: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn from_ticker(symbol: &str, ticker: Ticker, at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: format_price(ticker.last_price),
            change_percent: ticker.price_change_percent,
            last_updated: at,
        }
    }

    /// Base asset for display, e.g. "BTC" for "BTCUSDT".
    pub fn base_asset(&self) -> &str {
        base_asset(&self.symbol)
    }

    /// Signed percent string, e.g. "+2.45%" or "-0.87%".
    pub fn formatted_change(&self) -> String {
        format_change_percent(self.change_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_formatted_snapshot() {
        let ticker = Ticker { last_price: 67432.5, price_change_percent: 1.23 };
        let snapshot = PriceSnapshot::from_ticker("BTCUSDT", ticker, Utc::now());

        assert_eq!(snapshot.price, "67,432.50");
        assert_eq!(snapshot.base_asset(), "BTC");
        assert_eq!(snapshot.formatted_change(), "+1.23%");
    }

    #[test]
    fn small_price_keeps_four_digits() {
        let ticker = Ticker { last_price: 0.0234, price_change_percent: -0.873 };
        let snapshot = PriceSnapshot::from_ticker("ANKRUSDT", ticker, Utc::now());

        assert_eq!(snapshot.price, "0.0234");
        assert_eq!(snapshot.formatted_change(), "-0.87%");
    }
}
