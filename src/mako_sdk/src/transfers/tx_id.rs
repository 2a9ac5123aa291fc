use candid::{CandidType, Nat};
use serde::{Deserialize, Serialize};

/// Ledger-side identifier of a settled transfer.
#[derive(CandidType, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxId {
    BlockIndex(Nat),
}
