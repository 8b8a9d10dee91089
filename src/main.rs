use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

use neura_wallet_core::utils::helper::truncate_address;
use neura_wallet_core::{
    AppConfig, AuthEvent, BalanceSynchronizer, BinanceMarketData, EvmRpcProvider,
    PriceFeedSynchronizer, SessionContext, WalletCandidate, WalletSource,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .with_file(true)
        .with_line_number(true)
        .init();

    dotenvy::dotenv().ok();

    tokio::runtime::Runtime::new()?.block_on(async {
        let config = AppConfig::from_env();

        info!("Initializing wallet dashboard core...");
        info!("RPC URL: {}", config.rpc_url);
        info!("Tracked symbols: {:?}", config.symbols);

        let balance_provider =
            Arc::new(EvmRpcProvider::new(config.rpc_url.clone(), config.native_decimals)?);
        let market_provider = Arc::new(BinanceMarketData::new()?);

        let balance_synchronizer =
            BalanceSynchronizer::new(balance_provider, config.balance_poll_interval());
        let price_synchronizer =
            PriceFeedSynchronizer::new(market_provider, config.price_poll_interval());

        // The price feed runs whether or not anyone is logged in.
        let prices = price_synchronizer.start(config.symbols.clone());
        let mut price_rx = prices.watch();
        tokio::spawn(async move {
            while price_rx.changed().await.is_ok() {
                let snapshots = price_rx.borrow().clone();
                let mut lines: Vec<String> = snapshots
                    .values()
                    .map(|s| format!("{} ${} ({})", s.base_asset(), s.price, s.formatted_change()))
                    .collect();
                lines.sort();
                info!("Prices: {}", lines.join(" | "));
            }
        });

        let mut session = SessionContext::new(balance_synchronizer, config.wallet_priority.clone());

        // A real integration feeds candidates from the auth provider's
        // session; here the demo wallet comes from the environment.
        match std::env::var("WALLET_ADDRESS") {
            Ok(address) => {
                info!("Wallet Address: {}", address);
                session.apply(AuthEvent::LoggedIn(vec![WalletCandidate::new(
                    WalletSource::ProviderManaged,
                    address,
                )]));

                if let Some(mut balance_rx) = session.watch_balance() {
                    tokio::spawn(async move {
                        while balance_rx.changed().await.is_ok() {
                            let snapshot = balance_rx.borrow().clone();
                            let address = truncate_address(&snapshot.address);
                            match &snapshot.fetch_error {
                                Some(error) => warn!(
                                    "Balance for {} stale at {}: {}",
                                    address, snapshot.amount, error
                                ),
                                None => info!("Balance for {}: {}", address, snapshot.amount),
                            }
                        }
                    });
                }
            }
            Err(_) => {
                warn!("WALLET_ADDRESS not set, running unauthenticated (price feed only)");
            }
        }

        info!("Wallet dashboard core is running. Press Ctrl+C to stop.");

        tokio::signal::ctrl_c().await?;

        session.apply(AuthEvent::LoggedOut);
        prices.stop();
        info!("Shutting down...");

        Ok(())
    })
}
