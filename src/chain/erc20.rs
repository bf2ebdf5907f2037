//! Minimal ERC-20 read surface: balanceOf, symbol, decimals.

use serde::{Deserialize, Serialize};
use web3::contract::{Contract, Options};
use web3::transports::Http;
use web3::types::{Address, U256};
use web3::Web3;

use crate::utils::error::Result;

/// ABI fragment covering the three read calls the explorer issues.
const ERC20_ABI: &[u8] = include_bytes!("erc20_abi.json");

/// Symbol and scale of a token contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: &str, decimals: u8) -> Self {
        Self { symbol: symbol.to_string(), decimals }
    }
}

fn bind(web3: &Web3<Http>, token: Address) -> Result<Contract<Http>> {
    Ok(Contract::from_json(web3.eth(), token, ERC20_ABI)?)
}

/// Query balanceOf(owner) on a token contract
pub async fn balance_of(web3: &Web3<Http>, token: Address, owner: Address) -> Result<U256> {
    let contract = bind(web3, token)?;
    let balance: U256 = contract
        .query("balanceOf", (owner,), None, Options::default(), None)
        .await?;
    Ok(balance)
}

/// Query symbol() and decimals() on a token contract.
///
/// Fails on contracts that match the discovery heuristic but do not
/// implement the calls (callers treat that as "not a token").
pub async fn token_info(web3: &Web3<Http>, token: Address) -> Result<TokenInfo> {
    let contract = bind(web3, token)?;
    let symbol: String = contract
        .query("symbol", (), None, Options::default(), None)
        .await?;
    let decimals: U256 = contract
        .query("decimals", (), None, Options::default(), None)
        .await?;

    Ok(TokenInfo { symbol, decimals: decimals.low_u32() as u8 })
}
