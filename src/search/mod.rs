//! Search box classification.
//!
//! The navbar search accepts an address, a transaction or block hash, or a
//! block number; everything else is rejected before any RPC is issued.

use std::str::FromStr;

use web3::types::{H160, H256};

/// Where a search query should land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// 0x-prefixed, 42 characters
    Address(H160),
    /// 0x-prefixed, 66 characters (transaction or block hash)
    Hash(H256),
    /// Plain decimal block number
    Block(u64),
    /// Nothing typed
    Empty,
    /// Anything else
    Invalid,
}

/// Classify a raw search query.
pub fn classify(input: &str) -> SearchTarget {
    let query = input.trim();
    if query.is_empty() {
        return SearchTarget::Empty;
    }

    if let Some(digits) = query.strip_prefix("0x") {
        if query.len() == 42 {
            return match H160::from_str(digits) {
                Ok(address) => SearchTarget::Address(address),
                Err(_) => SearchTarget::Invalid,
            };
        }
        if query.len() == 66 {
            return match H256::from_str(digits) {
                Ok(hash) => SearchTarget::Hash(hash),
                Err(_) => SearchTarget::Invalid,
            };
        }
        return SearchTarget::Invalid;
    }

    match query.parse::<u64>() {
        Ok(number) => SearchTarget::Block(number),
        Err(_) => SearchTarget::Invalid,
    }
}
