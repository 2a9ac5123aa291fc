use candid::Nat;
use num_bigint::BigUint;
use num_traits::Zero;

pub fn nat_zero() -> Nat {
    Nat::from(0_u128)
}

pub fn nat_is_zero(n: &Nat) -> bool {
    n.0.is_zero()
}

pub fn nat_add(n1: &Nat, n2: &Nat) -> Nat {
    Nat(&n1.0 + &n2.0)
}

/// None on underflow.
pub fn nat_subtract(n1: &Nat, n2: &Nat) -> Option<Nat> {
    if n1.0 < n2.0 {
        return None;
    }
    Some(Nat(&n1.0 - &n2.0))
}

pub fn nat_multiply_u64(n: &Nat, factor: u64) -> Nat {
    Nat(&n.0 * factor)
}

fn decimal_multiplier(decimals: u8) -> BigUint {
    BigUint::from(10_u32).pow(decimals as u32)
}

/// Scales a human-readable decimal string into minor units, rounding down.
/// The inverse of [`nat_to_decimal_str`].
pub fn nat_from_decimal_str(amount: &str, decimals: u8) -> Result<Nat, String> {
    let amount = amount.trim();
    let (integer_part, fraction_part) = match amount.split_once('.') {
        Some((integer_part, fraction_part)) => (integer_part, fraction_part),
        None => (amount, ""),
    };
    if integer_part.is_empty() && fraction_part.is_empty() {
        return Err(format!("Invalid amount {}", amount));
    }
    if !integer_part.chars().all(|c| c.is_ascii_digit()) || !fraction_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount {}", amount));
    }

    let mut value = if integer_part.is_empty() {
        BigUint::zero()
    } else {
        integer_part.parse::<BigUint>().map_err(|e| e.to_string())?
    };
    value *= decimal_multiplier(decimals);

    // extra fraction digits beyond the token's precision are dropped
    let fraction_digits: String = fraction_part.chars().take(decimals as usize).collect();
    if !fraction_digits.is_empty() {
        let scale = decimal_multiplier(decimals - fraction_digits.len() as u8);
        value += fraction_digits.parse::<BigUint>().map_err(|e| e.to_string())? * scale;
    }

    Ok(Nat(value))
}

/// Renders minor units as a decimal string, trimming trailing zeros.
pub fn nat_to_decimal_str(amount: &Nat, decimals: u8) -> String {
    let multiplier = decimal_multiplier(decimals);
    let integer_part = &amount.0 / &multiplier;
    let fraction_part = &amount.0 % &multiplier;
    if fraction_part.is_zero() {
        return integer_part.to_string();
    }
    let fraction = format!("{:0>width$}", fraction_part.to_string(), width = decimals as usize);
    format!("{}.{}", integer_part, fraction.trim_end_matches('0'))
}
