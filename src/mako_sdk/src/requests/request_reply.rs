use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::swap::swap_args::SwapArgs;
use crate::swap::swap_reply::SwapReply;

/// Echo of the submitted request, as stored by the backend.
#[derive(CandidType, Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    Swap(SwapArgs),
}

/// Outcome of an asynchronous request. Pending until the backend settles it.
#[derive(CandidType, Debug, Clone, Serialize, Deserialize)]
pub enum Reply {
    Pending,
    Swap(SwapReply),
}

#[derive(CandidType, Debug, Clone, Serialize, Deserialize)]
pub struct RequestsReply {
    pub request_id: u64,
    pub statuses: Vec<String>,
    pub request: Request,
    pub reply: Reply,
    pub ts: u64,
}
