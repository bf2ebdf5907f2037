//! Aggregation service shaping RPC results into page view models.
//!
//! Mirrors what a client-side explorer does: sequential lookups against the
//! node, no storage of its own. The block page is the one place where
//! transaction hydration fans out concurrently.

pub mod scan;
pub mod types;

use std::sync::Arc;

use futures::future::try_join_all;
use web3::types::{Address, Block, BlockId, H256};

use crate::chain::ChainRpc;
use crate::config::{ChainConfig, ExplorerConfig};
use crate::utils::error::{Error, Result};
use crate::utils::format;

pub use types::{
    AddressTransaction, AddressView, BlockSummary, BlockTransaction, BlockView, HomeView, LogView,
    TokenBalance, TransactionSummary, TransactionView,
};

/// The explorer service behind every page
pub struct Explorer {
    chain: Arc<dyn ChainRpc>,
    chain_cfg: ChainConfig,
    explorer_cfg: ExplorerConfig,
}

impl Explorer {
    pub fn new(chain: Arc<dyn ChainRpc>, chain_cfg: ChainConfig, explorer_cfg: ExplorerConfig) -> Self {
        Self { chain, chain_cfg, explorer_cfg }
    }

    /// Latest blocks and latest transactions for the home page.
    ///
    /// Blocks walk down from the tip for at most `home_block_count` steps;
    /// transactions keep walking down until `home_transaction_count` rows
    /// are collected or block 1 has been visited. Genesis is never scanned.
    pub async fn home(&self) -> Result<HomeView> {
        let latest = self.chain.latest_block_number().await?;

        let mut blocks = Vec::new();
        let count = latest.min(self.explorer_cfg.home_block_count);
        for i in 0..count {
            let number = latest - i;
            if let Some(block) = self.chain.block(BlockId::Number(number.into())).await? {
                blocks.push(BlockSummary {
                    number,
                    timestamp: block.timestamp.low_u64(),
                });
            }
        }

        let mut transactions = Vec::new();
        let mut number = latest;
        while transactions.len() < self.explorer_cfg.home_transaction_count && number > 0 {
            if let Some(block) = self.chain.block(BlockId::Number(number.into())).await? {
                let timestamp = block.timestamp.low_u64();
                for hash in block.transactions {
                    if self.chain.transaction(hash).await?.is_some() {
                        transactions.push(TransactionSummary { hash, timestamp });
                    }
                    if transactions.len() >= self.explorer_cfg.home_transaction_count {
                        break;
                    }
                }
            }
            number -= 1;
        }

        Ok(HomeView { blocks, transactions })
    }

    /// Block details by number. Unknown numbers are an error (the page
    /// renders the error surface).
    pub async fn block_by_number(&self, number: u64) -> Result<BlockView> {
        let block = self
            .chain
            .block(BlockId::Number(number.into()))
            .await?
            .ok_or_else(|| Error::NotFound(format!("block {}", number)))?;
        self.hydrate_block(block).await
    }

    /// Block details by hash, used by the search fallback.
    pub async fn block_by_hash(&self, hash: H256) -> Result<Option<BlockView>> {
        match self.chain.block(BlockId::Hash(hash)).await? {
            Some(block) => Ok(Some(self.hydrate_block(block).await?)),
            None => Ok(None),
        }
    }

    async fn hydrate_block(&self, block: Block<H256>) -> Result<BlockView> {
        let fetches = block
            .transactions
            .iter()
            .map(|hash| self.chain.transaction(*hash));
        let fetched = try_join_all(fetches).await?;

        let transactions = block
            .transactions
            .iter()
            .zip(fetched)
            .map(|(hash, tx)| match tx {
                Some(tx) => BlockTransaction { hash: *hash, from: tx.from, to: tx.to },
                None => BlockTransaction { hash: *hash, from: None, to: None },
            })
            .collect();

        Ok(BlockView {
            number: block.number.map(|n| n.as_u64()),
            hash: block.hash,
            parent_hash: block.parent_hash,
            timestamp: block.timestamp.low_u64(),
            nonce: block.nonce,
            difficulty: block.difficulty,
            gas_limit: block.gas_limit,
            gas_used: block.gas_used,
            transactions,
        })
    }

    /// Transaction details plus block timestamp, receipt and event logs.
    pub async fn transaction(&self, hash: H256) -> Result<TransactionView> {
        let tx = self
            .chain
            .transaction(hash)
            .await?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", format::hex_h256(&hash))))?;

        // The timestamp lives on the containing block; pending txs have none
        let timestamp = match tx.block_number {
            Some(number) => self
                .chain
                .block(BlockId::Number(number.as_u64().into()))
                .await?
                .map(|b| b.timestamp.low_u64()),
            None => None,
        };

        let receipt = self.chain.transaction_receipt(hash).await?;
        let (gas_used, logs) = match receipt {
            Some(receipt) => {
                let logs = receipt
                    .logs
                    .into_iter()
                    .enumerate()
                    .map(|(index, log)| LogView {
                        index,
                        address: log.address,
                        data: log.data.0,
                    })
                    .collect();
                (receipt.gas_used, logs)
            }
            None => (None, Vec::new()),
        };

        Ok(TransactionView {
            hash: tx.hash,
            block_number: tx.block_number.map(|n| n.as_u64()),
            timestamp,
            from: tx.from,
            to: tx.to,
            value: tx.value,
            gas_price: tx.gas_price,
            gas_limit: tx.gas,
            gas_used,
            nonce: tx.nonce,
            transaction_index: tx.transaction_index.map(|i| i.as_u64()),
            input: tx.input.0,
            logs,
        })
    }

    /// Balance, token balances and full transaction history of an address.
    ///
    /// The balance is required; the two scans degrade to empty sections on
    /// failure so a flaky node still yields a page.
    pub async fn address(&self, address: Address) -> Result<AddressView> {
        let balance = self.chain.balance(address).await?;

        let tokens = match self.token_balances(address).await {
            Ok(tokens) => tokens,
            Err(e) => {
                log::error!("token balance lookup for {:?} failed: {}", address, e);
                Vec::new()
            }
        };

        let transactions =
            match scan::collect_address_transactions(self.chain.as_ref(), address).await {
                Ok(transactions) => transactions,
                Err(e) => {
                    log::error!("history scan for {:?} failed: {}", address, e);
                    Vec::new()
                }
            };

        Ok(AddressView { address, balance, tokens, transactions })
    }

    async fn token_balances(&self, owner: Address) -> Result<Vec<TokenBalance>> {
        let contracts = scan::discover_token_contracts(
            self.chain.as_ref(),
            &self.chain_cfg.token_code_prefix,
        )
        .await?;

        let mut tokens = Vec::new();
        for contract in contracts {
            // A contract can match the bytecode prefix without being a
            // readable ERC-20; those are skipped, not fatal.
            let balance = match self.chain.token_balance(contract, owner).await {
                Ok(balance) => balance,
                Err(e) => {
                    log::warn!("skipping contract {:?}: balanceOf failed: {}", contract, e);
                    continue;
                }
            };
            let info = match self.chain.token_info(contract).await {
                Ok(info) => info,
                Err(e) => {
                    log::warn!("skipping contract {:?}: metadata failed: {}", contract, e);
                    continue;
                }
            };
            tokens.push(TokenBalance {
                contract,
                symbol: info.symbol,
                balance: format::format_units(balance, info.decimals),
            });
        }
        Ok(tokens)
    }
}
