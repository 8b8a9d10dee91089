//! Collaborator seams for the wallet dashboard core

pub mod balance_provider;
pub mod market_provider;
pub mod signer;

// Re-export for convenience
pub use balance_provider::BalanceProvider;
pub use market_provider::{MarketDataProvider, Ticker};
pub use signer::TransactionSigner;
