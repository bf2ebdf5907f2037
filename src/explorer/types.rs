//! View models handed from the aggregation service to the renderer.

use web3::types::{Address, H256, H64, U256};

/// Home page row for a recent block
#[derive(Debug, Clone)]
pub struct BlockSummary {
    pub number: u64,
    pub timestamp: u64,
}

/// Home page row for a recent transaction
#[derive(Debug, Clone)]
pub struct TransactionSummary {
    pub hash: H256,
    pub timestamp: u64,
}

/// Home page content
#[derive(Debug, Clone)]
pub struct HomeView {
    pub blocks: Vec<BlockSummary>,
    pub transactions: Vec<TransactionSummary>,
}

/// One hydrated transaction row on the block page
#[derive(Debug, Clone)]
pub struct BlockTransaction {
    pub hash: H256,
    pub from: Option<Address>,
    pub to: Option<Address>,
}

/// Block page content. `number`, `hash` and `nonce` are absent on
/// pending blocks.
#[derive(Debug, Clone)]
pub struct BlockView {
    pub number: Option<u64>,
    pub hash: Option<H256>,
    pub parent_hash: H256,
    pub timestamp: u64,
    pub nonce: Option<H64>,
    pub difficulty: U256,
    pub gas_limit: U256,
    pub gas_used: U256,
    pub transactions: Vec<BlockTransaction>,
}

/// Event log row on the transaction page
#[derive(Debug, Clone)]
pub struct LogView {
    pub index: usize,
    pub address: Address,
    pub data: Vec<u8>,
}

/// Transaction page content. Receipt-derived fields stay `None` while the
/// transaction is pending.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub hash: H256,
    pub block_number: Option<u64>,
    pub timestamp: Option<u64>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_price: Option<U256>,
    pub gas_limit: U256,
    pub gas_used: Option<U256>,
    pub nonce: U256,
    pub transaction_index: Option<u64>,
    pub input: Vec<u8>,
    pub logs: Vec<LogView>,
}

/// Token balance row on the address page. The balance is already scaled
/// by the token's own decimals.
#[derive(Debug, Clone)]
pub struct TokenBalance {
    pub contract: Address,
    pub symbol: String,
    pub balance: String,
}

/// Address history row, enriched with receipt data
#[derive(Debug, Clone)]
pub struct AddressTransaction {
    pub hash: H256,
    pub timestamp: u64,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_limit: U256,
    pub gas_used: Option<U256>,
    pub contract_address: Option<Address>,
    pub status: Option<u64>,
}

/// Address page content
#[derive(Debug, Clone)]
pub struct AddressView {
    pub address: Address,
    pub balance: U256,
    pub tokens: Vec<TokenBalance>,
    pub transactions: Vec<AddressTransaction>,
}
