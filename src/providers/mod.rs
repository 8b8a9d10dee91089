//! Concrete adapters for the external collaborators

pub mod binance;
pub mod evm_rpc;

// Re-export for convenience
pub use binance::BinanceMarketData;
pub use evm_rpc::EvmRpcProvider;
