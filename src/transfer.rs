//! Send-path input validation and delegation to the external signer.
//!
//! Nothing here constructs or signs transactions; bad input is rejected
//! before the wallet provider is involved, and the provider's outcome is
//! relayed as-is.

use crate::error::TransferError;
use crate::models::wallet::ResolvedIdentity;
use crate::traits::signer::TransactionSigner;

/// A user-entered transfer, still unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: String,
    pub amount: String,
}

impl TransferRequest {
    pub fn new(to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self { to: to.into(), amount: amount.into() }
    }
}

/// Validate a transfer against the current balance. No state is mutated;
/// the first failed check wins.
pub fn validate(request: &TransferRequest, available: &str) -> Result<(), TransferError> {
    if !is_hex_address(&request.to) {
        return Err(TransferError::InvalidRecipient(request.to.clone()));
    }

    let amount: f64 = request
        .amount
        .parse()
        .map_err(|_| TransferError::InvalidAmount(request.amount.clone()))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TransferError::InvalidAmount(request.amount.clone()));
    }

    let balance: f64 = available.parse().unwrap_or(0.0);
    if amount > balance {
        return Err(TransferError::InsufficientBalance {
            available: available.to_string(),
            requested: request.amount.clone(),
        });
    }

    Ok(())
}

/// Validate and hand the transfer to the wallet provider. Returns the
/// transaction hash; the balance poll reflects the outcome on its next tick.
pub async fn send_native(
    signer: &dyn TransactionSigner,
    identity: &ResolvedIdentity,
    request: &TransferRequest,
    available: &str,
) -> Result<String, TransferError> {
    let from = identity.address().ok_or(TransferError::NoIdentity)?;
    validate(request, available)?;

    signer
        .send_native(from, &request.to, &request.amount)
        .await
        .map_err(|e| TransferError::Signer(e.to_string()))
}

fn is_hex_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].bytes().all(|b| b.is_ascii_hexdigit())
}
