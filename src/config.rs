use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::identity::resolver::WalletPriority;
use crate::models::wallet::WalletSource;

/// Default chain endpoint (Neura testnet, chain id 267).
pub const DEFAULT_RPC_URL: &str = "https://rpc.ankr.com/neura_testnet";

/// Decimals of the native unit on ether-style chains.
pub const DEFAULT_NATIVE_DECIMALS: u32 = 18;

/// Pair symbols the dashboard watchlist tracks by default.
pub const DEFAULT_SYMBOLS: [&str; 6] = [
    "ANKRUSDT", "BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT", "XRPUSDT",
];

const DEFAULT_BALANCE_POLL_SECS: u64 = 15;
const DEFAULT_PRICE_POLL_SECS: u64 = 10;

/// Runtime configuration, environment-driven with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    pub native_decimals: u32,
    pub balance_poll_secs: u64,
    pub price_poll_secs: u64,
    pub symbols: Vec<String>,
    pub wallet_priority: WalletPriority,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            native_decimals: DEFAULT_NATIVE_DECIMALS,
            balance_poll_secs: DEFAULT_BALANCE_POLL_SECS,
            price_poll_secs: DEFAULT_PRICE_POLL_SECS,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            wallet_priority: WalletPriority::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from the environment. Unset or unparsable variables
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("NEURA_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(secs) = env_parse("BALANCE_POLL_SECS") {
            config.balance_poll_secs = secs;
        }
        if let Some(secs) = env_parse("PRICE_POLL_SECS") {
            config.price_poll_secs = secs;
        }
        if let Ok(raw) = std::env::var("PRICE_SYMBOLS") {
            let symbols = parse_symbol_list(&raw);
            if symbols.is_empty() {
                warn!("PRICE_SYMBOLS is set but empty, keeping default symbols");
            } else {
                config.symbols = symbols;
            }
        }
        if let Ok(raw) = std::env::var("WALLET_PRIORITY") {
            match parse_priority(&raw) {
                Some(priority) => config.wallet_priority = priority,
                None => warn!("WALLET_PRIORITY {:?} not understood, keeping default order", raw),
            }
        }

        config
    }

    pub fn balance_poll_interval(&self) -> Duration {
        Duration::from_secs(self.balance_poll_secs)
    }

    pub fn price_poll_interval(&self) -> Duration {
        Duration::from_secs(self.price_poll_secs)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a comma-separated priority order such as
/// "user_linked,provider_managed,first_available".
fn parse_priority(raw: &str) -> Option<WalletPriority> {
    let order: Vec<WalletSource> = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(WalletSource::from_str)
        .collect::<Result<_, _>>()
        .ok()?;

    if order.is_empty() {
        None
    } else {
        Some(WalletPriority::new(order))
    }
}
