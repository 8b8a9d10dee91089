use async_trait::async_trait;

use crate::error::FetchError;

/// Seam for the external chain-balance collaborator.
///
/// Implementations query whatever endpoint holds the chain state and return
/// the native-unit balance as a decimal string. Transport and format
/// problems come back as classified [`FetchError`]s; the synchronizer treats
/// all of them as transient.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Fetch the native balance for an address.
    async fn fetch_native_balance(&self, address: &str) -> Result<String, FetchError>;
}
