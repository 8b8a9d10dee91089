//! Wallet Dashboard Core
//!
//! Client-side core for an embedded-wallet dashboard: resolves which of the
//! auth provider's candidate wallets is the session's active account, keeps
//! its native balance fresh by polling a chain RPC endpoint, and keeps a
//! watchlist of market prices fresh independently of authentication.

// Public modules - these are the API surface
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod providers;
pub mod session;
pub mod sync;
pub mod traits;
pub mod transfer;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::AppConfig;
pub use error::{FetchError, TransferError};
pub use identity::resolver::WalletPriority;
pub use models::{
    balance::BalanceSnapshot,
    price::PriceSnapshot,
    wallet::{ResolvedIdentity, WalletCandidate, WalletSource},
};
pub use providers::{binance::BinanceMarketData, evm_rpc::EvmRpcProvider};
pub use session::context::{AuthEvent, SessionContext};
pub use sync::{
    balance_sync::{BalanceSubscription, BalanceSynchronizer},
    price_sync::{PriceFeedSynchronizer, PriceSubscription},
};
pub use traits::{
    balance_provider::BalanceProvider,
    market_provider::{MarketDataProvider, Ticker},
    signer::TransactionSigner,
};
pub use transfer::TransferRequest;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
