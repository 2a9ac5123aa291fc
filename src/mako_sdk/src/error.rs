use thiserror::Error;

/// Failure taxonomy of the swap pipeline. Transport-level errors stay
/// `String` inside the actor traits; they are folded into these variants at
/// the component boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("Please connect your wallet to proceed with this operation")]
    WalletNotConnected,
    #[error("Token {0} not found")]
    TokenNotFound(String),
    #[error("Token {0} does not support ICRC1 or ICRC2")]
    UnsupportedTokenStandard(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Failed to approve {symbol}: {message}")]
    Approval { symbol: String, message: String },
    #[error("Transfer of {symbol} failed: {message}")]
    Transfer { symbol: String, message: String },
    #[error("Swap quote failed: {0}")]
    Quote(String),
    #[error("Swap submission failed: {0}")]
    Submission(String),
    #[error("Failed to monitor swap status: {0}")]
    Monitoring(String),
    #[error("Swap timed out")]
    Timeout,
}
