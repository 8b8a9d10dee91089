use serde::{Deserialize, Serialize};
use crate::models::wallet::{ResolvedIdentity, WalletCandidate, WalletSource};

/// The single named policy that decides which candidate wallet is "the"
/// session wallet.
///
/// Picking the wrong candidate displays (and would send from) the wrong
/// account, so the order lives in exactly one place: call sites resolve
/// through a `WalletPriority` value and never rank candidates themselves.
/// The default order prefers the provider-managed embedded wallet, then an
/// explicitly user-linked one, then whatever the provider listed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletPriority {
    order: Vec<WalletSource>,
}

impl Default for WalletPriority {
    fn default() -> Self {
        Self {
            order: vec![
                WalletSource::ProviderManaged,
                WalletSource::UserLinked,
                WalletSource::FirstAvailable,
            ],
        }
    }
}

impl WalletPriority {
    pub fn new(order: Vec<WalletSource>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[WalletSource] {
        &self.order
    }

    /// Derive the session identity from the current candidate set.
    ///
    /// Pure function of its input: candidate list order does not matter
    /// across source kinds, only the policy order does. Within one source
    /// kind the first listed candidate wins. An empty candidate set is the
    /// valid unauthenticated result, not an error.
    pub fn resolve(&self, candidates: &[WalletCandidate]) -> ResolvedIdentity {
        for source in &self.order {
            let hit = candidates
                .iter()
                .find(|c| c.source == *source && !c.address.is_empty());
            if let Some(candidate) = hit {
                return ResolvedIdentity::resolved(candidate.address.clone());
            }
        }
        ResolvedIdentity::absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(source: WalletSource, address: &str) -> WalletCandidate {
        WalletCandidate::new(source, address)
    }

    #[test]
    fn provider_managed_wins_regardless_of_list_order() {
        let priority = WalletPriority::default();

        let front = vec![
            candidate(WalletSource::ProviderManaged, "0xaaa"),
            candidate(WalletSource::UserLinked, "0xbbb"),
            candidate(WalletSource::FirstAvailable, "0xccc"),
        ];
        let back = vec![
            candidate(WalletSource::FirstAvailable, "0xccc"),
            candidate(WalletSource::UserLinked, "0xbbb"),
            candidate(WalletSource::ProviderManaged, "0xaaa"),
        ];

        assert_eq!(priority.resolve(&front).address(), Some("0xaaa"));
        assert_eq!(priority.resolve(&back).address(), Some("0xaaa"));
    }

    #[test]
    fn falls_through_to_lower_priority_sources() {
        let priority = WalletPriority::default();

        let no_managed = vec![
            candidate(WalletSource::FirstAvailable, "0xccc"),
            candidate(WalletSource::UserLinked, "0xbbb"),
        ];
        assert_eq!(priority.resolve(&no_managed).address(), Some("0xbbb"));

        let only_listed = vec![candidate(WalletSource::FirstAvailable, "0xccc")];
        assert_eq!(priority.resolve(&only_listed).address(), Some("0xccc"));
    }

    #[test]
    fn empty_candidates_resolve_absent() {
        let identity = WalletPriority::default().resolve(&[]);
        assert!(!identity.is_resolved());
        assert_eq!(identity, ResolvedIdentity::absent());
    }

    #[test]
    fn empty_address_is_not_a_candidate() {
        let priority = WalletPriority::default();
        let candidates = vec![
            candidate(WalletSource::ProviderManaged, ""),
            candidate(WalletSource::UserLinked, "0xbbb"),
        ];
        assert_eq!(priority.resolve(&candidates).address(), Some("0xbbb"));
    }

    #[test]
    fn configured_order_overrides_default() {
        let priority = WalletPriority::new(vec![
            WalletSource::UserLinked,
            WalletSource::ProviderManaged,
            WalletSource::FirstAvailable,
        ]);
        let candidates = vec![
            candidate(WalletSource::ProviderManaged, "0xaaa"),
            candidate(WalletSource::UserLinked, "0xbbb"),
        ];
        assert_eq!(priority.resolve(&candidates).address(), Some("0xbbb"));
    }

    #[test]
    fn first_listed_wins_within_one_source() {
        let priority = WalletPriority::default();
        let candidates = vec![
            candidate(WalletSource::UserLinked, "0x111"),
            candidate(WalletSource::UserLinked, "0x222"),
        ];
        assert_eq!(priority.resolve(&candidates).address(), Some("0x111"));
    }
}
