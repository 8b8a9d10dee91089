//! Periodic synchronizers keeping external data fresh

pub mod balance_sync;
pub mod price_sync;


// Re-export for convenience
pub use balance_sync::{BalanceSubscription, BalanceSynchronizer};
pub use price_sync::{PriceFeedSynchronizer, PriceSubscription};
