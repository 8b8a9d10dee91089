//! Data models for the wallet dashboard core

pub mod balance;
pub mod price;
pub mod wallet;

// Re-export for convenience
pub use balance::BalanceSnapshot;
pub use price::PriceSnapshot;
pub use wallet::{ResolvedIdentity, WalletCandidate, WalletSource};
