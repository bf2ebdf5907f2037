//! Display helpers for chain quantities.
//!
//! Amount formatting is exact integer arithmetic; the fractional part is
//! trimmed to the last significant digit but never below one digit, so a
//! whole amount renders as "1.0" and zero as "0.0".

use chrono::Utc;
use web3::types::{H160, H256, U256};

/// Convert a raw token amount to a decimal string at the given scale.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = U256::exp10(decimals as usize);
    let whole = amount / scale;
    let remainder = amount % scale;

    let mut fraction = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = decimals as usize
    );
    while fraction.ends_with('0') {
        fraction.pop();
    }
    if fraction.is_empty() {
        fraction.push('0');
    }

    format!("{}.{}", whole, fraction)
}

/// Convert a wei amount to a decimal ether string (18 decimals).
pub fn format_ether(wei: U256) -> String {
    format_units(wei, 18)
}

/// Humanised relative time between two unix timestamps (seconds).
pub fn age(now: u64, then: u64) -> String {
    if then >= now {
        return "just now".to_string();
    }
    let diff = now - then;
    if diff < 5 {
        "just now".to_string()
    } else if diff < 60 {
        plural(diff, "second")
    } else if diff < 3_600 {
        plural(diff / 60, "minute")
    } else if diff < 86_400 {
        plural(diff / 3_600, "hour")
    } else {
        plural(diff / 86_400, "day")
    }
}

/// Relative time from the current wall clock.
pub fn age_from_now(then: u64) -> String {
    age(Utc::now().timestamp().max(0) as u64, then)
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Full-width lowercase hex for an address.
///
/// The `Display` impl of the hash types elides the middle of the value;
/// pages need the whole thing.
pub fn hex_h160(value: &H160) -> String {
    format!("0x{}", hex::encode(value.as_bytes()))
}

/// Full-width lowercase hex for a 32-byte hash.
pub fn hex_h256(value: &H256) -> String {
    format!("0x{}", hex::encode(value.as_bytes()))
}

/// Hex rendering for raw byte strings (calldata, log data). Empty input
/// renders as "0x".
pub fn hex_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
