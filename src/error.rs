use thiserror::Error;

/// Classified failure of a collaborator fetch (chain RPC or market data).
///
/// None of these are fatal: synchronizers log the failure, keep the last
/// good snapshot and surface the error as a staleness flag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Errors on the send path. Validation failures are rejected before the
/// external signer is involved; `Signer` carries the provider's own failure
/// text verbatim.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient balance: have {available}, requested {requested}")]
    InsufficientBalance { available: String, requested: String },

    #[error("no wallet resolved for this session")]
    NoIdentity,

    #[error("wallet provider rejected the transaction: {0}")]
    Signer(String),
}
