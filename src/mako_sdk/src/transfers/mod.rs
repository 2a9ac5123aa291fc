pub mod transfer_reply;
pub mod tx_id;
