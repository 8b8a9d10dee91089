use tokio::sync::watch;
use tracing::info;

use crate::identity::resolver::WalletPriority;
use crate::models::balance::BalanceSnapshot;
use crate::models::wallet::{ResolvedIdentity, WalletCandidate};
use crate::sync::balance_sync::{BalanceSubscription, BalanceSynchronizer};

/// Session transitions reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn(Vec<WalletCandidate>),
    /// The candidate set changed within a live session (wallet linked or
    /// removed, account switched).
    WalletsChanged(Vec<WalletCandidate>),
    LoggedOut,
}

/// Explicit session state owned by the presentation layer.
///
/// Receives auth events, re-resolves the active wallet through the single
/// priority policy, and keeps the balance poll loop in step with it:
/// resolve starts polling, a different resolution switches the tracked
/// address, logout stops the loop. The price feed is deliberately not
/// managed here since it runs regardless of authentication.
pub struct SessionContext {
    priority: WalletPriority,
    synchronizer: BalanceSynchronizer,
    identity: ResolvedIdentity,
    subscription: Option<BalanceSubscription>,
}

impl SessionContext {
    pub fn new(synchronizer: BalanceSynchronizer, priority: WalletPriority) -> Self {
        Self {
            priority,
            synchronizer,
            identity: ResolvedIdentity::absent(),
            subscription: None,
        }
    }

    pub fn identity(&self) -> &ResolvedIdentity {
        &self.identity
    }

    /// Latest balance snapshot, if a wallet is resolved.
    pub fn balance_snapshot(&self) -> Option<BalanceSnapshot> {
        self.subscription.as_ref().map(|s| s.snapshot())
    }

    /// Reactive balance view, if a wallet is resolved.
    pub fn watch_balance(&self) -> Option<watch::Receiver<BalanceSnapshot>> {
        self.subscription.as_ref().map(|s| s.watch())
    }

    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::LoggedIn(candidates) | AuthEvent::WalletsChanged(candidates) => {
                self.sync_candidates(&candidates)
            }
            AuthEvent::LoggedOut => self.sync_candidates(&[]),
        }
    }

    fn sync_candidates(&mut self, candidates: &[WalletCandidate]) {
        let next = self.priority.resolve(candidates);
        if next == self.identity {
            return;
        }

        match next.address() {
            None => {
                if let Some(subscription) = self.subscription.take() {
                    subscription.stop();
                }
                info!("no wallet resolved, balance polling stopped");
            }
            Some(address) => match &self.subscription {
                Some(subscription) => {
                    info!(%address, "active wallet changed, retargeting balance polling");
                    subscription.switch_address(address);
                }
                None => {
                    info!(%address, "wallet resolved, starting balance polling");
                    self.subscription = Some(self.synchronizer.start(address.to_string()));
                }
            },
        }

        self.identity = next;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::sleep;

    use super::*;
    use crate::error::FetchError;
    use crate::models::wallet::WalletSource;
    use crate::traits::balance_provider::BalanceProvider;

    struct StaticProvider {
        amounts: HashMap<String, String>,
    }

    impl StaticProvider {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                amounts: entries
                    .iter()
                    .map(|(address, amount)| (address.to_string(), amount.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl BalanceProvider for StaticProvider {
        async fn fetch_native_balance(&self, address: &str) -> Result<String, FetchError> {
            self.amounts
                .get(address)
                .cloned()
                .ok_or_else(|| FetchError::Network("unknown address".to_string()))
        }
    }

    fn context(entries: &[(&str, &str)]) -> SessionContext {
        let provider = Arc::new(StaticProvider::new(entries));
        let synchronizer = BalanceSynchronizer::new(provider, Duration::from_millis(50));
        SessionContext::new(synchronizer, WalletPriority::default())
    }

    #[tokio::test(start_paused = true)]
    async fn login_starts_polling_and_logout_stops_it() {
        let mut session = context(&[("0xaaa", "5")]);
        assert!(!session.identity().is_resolved());
        assert!(session.balance_snapshot().is_none());

        session.apply(AuthEvent::LoggedIn(vec![WalletCandidate::new(
            WalletSource::ProviderManaged,
            "0xaaa",
        )]));
        assert_eq!(session.identity().address(), Some("0xaaa"));

        let mut rx = session.watch_balance().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().amount, "5");

        session.apply(AuthEvent::LoggedOut);
        assert!(!session.identity().is_resolved());
        assert!(session.balance_snapshot().is_none());
        assert!(session.watch_balance().is_none());

        // The stopped loop must not touch the old view anymore.
        sleep(Duration::from_millis(300)).await;
        assert_eq!(rx.borrow().amount, "5");
    }

    #[tokio::test(start_paused = true)]
    async fn wallet_change_retargets_polling() {
        let mut session = context(&[("0xaaa", "1"), ("0xbbb", "2")]);

        session.apply(AuthEvent::LoggedIn(vec![WalletCandidate::new(
            WalletSource::ProviderManaged,
            "0xaaa",
        )]));
        let mut rx = session.watch_balance().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().amount, "1");

        session.apply(AuthEvent::WalletsChanged(vec![WalletCandidate::new(
            WalletSource::ProviderManaged,
            "0xbbb",
        )]));
        assert_eq!(session.identity().address(), Some("0xbbb"));

        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow().clone();
            if snapshot.amount == "2" {
                assert_eq!(snapshot.address, "0xbbb");
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_candidates_do_not_restart_polling() {
        let candidates = vec![WalletCandidate::new(WalletSource::ProviderManaged, "0xaaa")];
        let mut session = context(&[("0xaaa", "1")]);

        session.apply(AuthEvent::LoggedIn(candidates.clone()));
        let mut rx = session.watch_balance().unwrap();
        rx.changed().await.unwrap();

        session.apply(AuthEvent::WalletsChanged(candidates));
        let snapshot = session.balance_snapshot().unwrap();
        assert_eq!(snapshot.amount, "1");
        assert!(snapshot.is_populated());
    }

    #[tokio::test(start_paused = true)]
    async fn lower_priority_candidate_ignored_while_managed_wallet_present() {
        let mut session = context(&[("0xmanaged", "3")]);

        session.apply(AuthEvent::LoggedIn(vec![
            WalletCandidate::new(WalletSource::UserLinked, "0xlinked"),
            WalletCandidate::new(WalletSource::ProviderManaged, "0xmanaged"),
        ]));

        assert_eq!(session.identity().address(), Some("0xmanaged"));
        let mut rx = session.watch_balance().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().amount, "3");
    }
}
