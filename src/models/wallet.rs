use serde::{Deserialize, Serialize};

/// Where a candidate wallet record came from, as reported by the auth
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletSource {
    /// Embedded wallet created and managed by the auth provider for this
    /// session.
    ProviderManaged,
    /// External wallet the user linked to their account.
    UserLinked,
    /// Whatever the provider listed first, with no stronger association.
    FirstAvailable,
}

/// An address the auth collaborator reports as possibly belonging to the
/// session. Read-only input; zero or more per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCandidate {
    pub source: WalletSource,
    pub address: String,
}

impl WalletCandidate {
    pub fn new(source: WalletSource, address: impl Into<String>) -> Self {
        Self { source, address: address.into() }
    }
}

impl std::str::FromStr for WalletSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "provider_managed" => Ok(WalletSource::ProviderManaged),
            "user_linked" => Ok(WalletSource::UserLinked),
            "first_available" => Ok(WalletSource::FirstAvailable),
            other => Err(anyhow::anyhow!("unknown wallet source {:?}", other)),
        }
    }
}

/// The one address representing the session's active account, or absent
/// when no candidate qualifies (the unauthenticated state, not an error).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub address: Option<String>,
}

impl ResolvedIdentity {
    /// The unauthenticated identity.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn resolved(address: impl Into<String>) -> Self {
        Self { address: Some(address.into()) }
    }

    pub fn is_resolved(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
