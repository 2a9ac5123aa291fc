use candid::Nat;

use crate::helpers::nat_helpers::{nat_add, nat_subtract, nat_zero};

/// Maximum amount a user can actually spend from `balance`: a direct ICRC1
/// transfer burns one ledger fee, the approve + transfer_from flow burns two.
/// Floors at zero when the fees exceed the balance.
pub fn max_spendable(balance: &Nat, fee: &Nat, is_icrc1: bool) -> Nat {
    let total_fee = if is_icrc1 { fee.clone() } else { nat_add(fee, fee) };
    nat_subtract(balance, &total_fee).unwrap_or_else(nat_zero)
}
