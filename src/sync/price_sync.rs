use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use futures_util::future::join_all;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::warn;

use crate::error::FetchError;
use crate::models::price::PriceSnapshot;
use crate::traits::market_provider::{MarketDataProvider, Ticker};

/// Periodic price poller for a fixed symbol set.
///
/// Runs independently of authentication state. Each tick fetches every
/// symbol concurrently; a symbol whose fetch fails keeps its previous
/// snapshot while the others update. The whole tick is the in-flight unit,
/// so ticks never pile up behind a slow collaborator.
pub struct PriceFeedSynchronizer {
    provider: Arc<dyn MarketDataProvider>,
    poll_interval: Duration,
}

impl PriceFeedSynchronizer {
    pub fn new(provider: Arc<dyn MarketDataProvider>, poll_interval: Duration) -> Self {
        Self { provider, poll_interval }
    }

    /// Start polling the given pair symbols.
    pub fn start(&self, symbols: Vec<String>) -> PriceSubscription {
        let (snapshot_tx, snapshot_rx) = watch::channel(HashMap::new());
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(run_poll_loop(
            Arc::clone(&self.provider),
            self.poll_interval,
            symbols,
            snapshot_tx,
            shutdown_rx,
        ));

        PriceSubscription { snapshot_rx, shutdown_tx, task }
    }
}

/// Handle for a running price poll. Dropping it cancels the task.
pub struct PriceSubscription {
    snapshot_rx: watch::Receiver<HashMap<String, PriceSnapshot>>,
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl PriceSubscription {
    /// Latest per-symbol snapshots, readable between ticks.
    pub fn snapshot(&self) -> HashMap<String, PriceSnapshot> {
        self.snapshot_rx.borrow().clone()
    }

    /// Reactive view of the snapshot map for the presentation layer.
    pub fn watch(&self) -> watch::Receiver<HashMap<String, PriceSnapshot>> {
        self.snapshot_rx.clone()
    }

    /// Cancel the poll task.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PriceSubscription {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn run_poll_loop(
    provider: Arc<dyn MarketDataProvider>,
    poll_interval: Duration,
    symbols: Vec<String>,
    snapshot_tx: watch::Sender<HashMap<String, PriceSnapshot>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let latest: DashMap<String, PriceSnapshot> = DashMap::new();
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            _ = ticker.tick() => {
                let results = tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break,
                    results = fetch_tick(provider.as_ref(), &symbols) => results,
                };

                let now = Utc::now();
                for (symbol, result) in symbols.iter().zip(results) {
                    match result {
                        Ok(ticker_data) => {
                            latest.insert(
                                symbol.clone(),
                                PriceSnapshot::from_ticker(symbol, ticker_data, now),
                            );
                        }
                        Err(error) => {
                            warn!(%symbol, %error, "ticker fetch failed, keeping previous snapshot");
                        }
                    }
                }

                let published: HashMap<String, PriceSnapshot> = latest
                    .iter()
                    .map(|entry| (entry.key().clone(), entry.value().clone()))
                    .collect();
                snapshot_tx.send_replace(published);
            }
        }
    }
}

async fn fetch_tick(
    provider: &dyn MarketDataProvider,
    symbols: &[String],
) -> Vec<Result<Ticker, FetchError>> {
    join_all(symbols.iter().map(|symbol| provider.fetch_ticker(symbol))).await
}
