use chrono::{DateTime, Utc};

use crate::error::FetchError;

/// Latest known native balance for the tracked address.
///
/// Mutated only by the balance poll cycle. A failed fetch never clears
/// `amount` once a successful fetch has populated it; the failure is kept
/// on `fetch_error` so the dashboard can flag staleness.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    pub address: String,
    /// Native-unit balance as a decimal string.
    pub amount: String,
    /// Absent until the first successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
    pub fetch_error: Option<FetchError>,
}

impl BalanceSnapshot {
    /// Snapshot for an address nothing has been fetched for yet.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: "0.00".to_string(),
            last_updated: None,
            fetch_error: None,
        }
    }

    pub fn record_success(&mut self, amount: String, at: DateTime<Utc>) {
        self.amount = amount;
        self.last_updated = Some(at);
        self.fetch_error = None;
    }

    /// Keeps the previous amount; only the error flag changes.
    pub fn record_failure(&mut self, error: FetchError) {
        self.fetch_error = Some(error);
    }

    /// True once at least one fetch has succeeded.
    pub fn is_populated(&self) -> bool {
        self.last_updated.is_some()
    }

    pub fn is_stale(&self) -> bool {
        self.fetch_error.is_some()
    }

    /// Dashboard USD estimate given the native asset's current price.
    pub fn usd_estimate(&self, native_price: f64) -> Option<f64> {
        self.amount.parse::<f64>().ok().map(|amount| amount * native_price)
    }
}
