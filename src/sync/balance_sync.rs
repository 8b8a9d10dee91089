use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::balance::BalanceSnapshot;
use crate::traits::balance_provider::BalanceProvider;

/// Periodic balance poller for the resolved wallet address.
///
/// Each `start` spawns one poll task that fetches immediately, then on a
/// fixed interval. The task never has more than one fetch in flight: a tick
/// firing while a fetch is pending is skipped rather than queued.
pub struct BalanceSynchronizer {
    provider: Arc<dyn BalanceProvider>,
    poll_interval: Duration,
}

impl BalanceSynchronizer {
    pub fn new(provider: Arc<dyn BalanceProvider>, poll_interval: Duration) -> Self {
        Self { provider, poll_interval }
    }

    /// Start polling for an address. The returned subscription owns the
    /// poll task; dropping it cancels the task.
    pub fn start(&self, address: String) -> BalanceSubscription {
        let (snapshot_tx, snapshot_rx) = watch::channel(BalanceSnapshot::empty(address.clone()));
        let (address_tx, address_rx) = watch::channel(address);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(run_poll_loop(
            Arc::clone(&self.provider),
            self.poll_interval,
            snapshot_tx,
            address_rx,
            shutdown_rx,
        ));

        BalanceSubscription { snapshot_rx, address_tx, shutdown_tx, task }
    }
}

/// Handle for a running balance poll. Cancelation is cooperative: the poll
/// task observes the shutdown signal before applying any in-flight result,
/// so nothing is emitted after `stop`.
pub struct BalanceSubscription {
    snapshot_rx: watch::Receiver<BalanceSnapshot>,
    address_tx: watch::Sender<String>,
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl BalanceSubscription {
    /// Latest snapshot, readable between ticks.
    pub fn snapshot(&self) -> BalanceSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Reactive view of the snapshot for the presentation layer.
    pub fn watch(&self) -> watch::Receiver<BalanceSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn address(&self) -> String {
        self.address_tx.borrow().clone()
    }

    /// Track a different address. The outstanding fetch (if any) is
    /// discarded, the snapshot resets for the new address and a fresh fetch
    /// is issued immediately. Switching to the current address is a no-op.
    pub fn switch_address(&self, address: impl Into<String>) {
        let address = address.into();
        self.address_tx.send_if_modified(|current| {
            if *current == address {
                false
            } else {
                *current = address;
                true
            }
        });
    }

    /// Cancel the poll task.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for BalanceSubscription {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn run_poll_loop(
    provider: Arc<dyn BalanceProvider>,
    poll_interval: Duration,
    snapshot_tx: watch::Sender<BalanceSnapshot>,
    mut address_rx: watch::Receiver<String>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            changed = address_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                restart_for_new_address(&snapshot_tx, &mut address_rx, &mut ticker);
            }
            _ = ticker.tick() => {
                let address = address_rx.borrow().clone();
                let outcome = tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break,
                    changed = address_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        restart_for_new_address(&snapshot_tx, &mut address_rx, &mut ticker);
                        continue;
                    }
                    result = provider.fetch_native_balance(&address) => result,
                };
                apply_outcome(&snapshot_tx, &address, outcome);
            }
        }
    }
}

fn restart_for_new_address(
    snapshot_tx: &watch::Sender<BalanceSnapshot>,
    address_rx: &mut watch::Receiver<String>,
    ticker: &mut Interval,
) {
    let address = address_rx.borrow_and_update().clone();
    debug!(%address, "tracked address changed, restarting poll cycle");
    snapshot_tx.send_replace(BalanceSnapshot::empty(address));
    ticker.reset_immediately();
}

fn apply_outcome(
    snapshot_tx: &watch::Sender<BalanceSnapshot>,
    address: &str,
    outcome: Result<String, FetchError>,
) {
    snapshot_tx.send_modify(|snapshot| {
        if snapshot.address != address {
            return;
        }
        match outcome {
            Ok(amount) => snapshot.record_success(amount, Utc::now()),
            Err(error) => {
                warn!(%address, %error, "balance fetch failed, keeping previous amount");
                snapshot.record_failure(error);
            }
        }
    });
}
