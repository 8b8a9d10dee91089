use async_trait::async_trait;

/// Seam for the external wallet provider's transaction path.
///
/// Transaction construction and signing are entirely the provider's job;
/// this core only hands over a validated request and relays the outcome.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Submit a native-unit transfer. Returns the transaction hash.
    async fn send_native(&self, from: &str, to: &str, amount: &str) -> anyhow::Result<String>;
}
