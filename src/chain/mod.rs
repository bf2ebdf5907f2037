//! Chain access layer.
//!
//! Everything the explorer knows about the chain comes through the
//! [`ChainRpc`] trait; [`NodeClient`] is the production implementation
//! backed by a `web3` HTTP transport.

pub mod erc20;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::increment_counter;
use tokio::sync::Mutex;
use web3::transports::Http;
use web3::types::{
    Address, Block, BlockId, Bytes, Transaction, TransactionId, TransactionReceipt, H256, U256,
};
use web3::Web3;

use crate::utils::error::Result;

pub use erc20::TokenInfo;

/// Trait defining the node operations the explorer performs
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Number of the most recent block
    async fn latest_block_number(&self) -> Result<u64>;

    /// Block header plus transaction hashes
    async fn block(&self, id: BlockId) -> Result<Option<Block<H256>>>;

    /// Transaction body by hash
    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>>;

    /// Receipt of a mined transaction
    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>>;

    /// Native-currency balance in wei
    async fn balance(&self, address: Address) -> Result<U256>;

    /// Deployed bytecode of an account (empty for externally owned accounts)
    async fn code(&self, address: Address) -> Result<Bytes>;

    /// ERC-20 balanceOf(owner) on the given token contract
    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;

    /// ERC-20 symbol() and decimals() of the given token contract
    async fn token_info(&self, token: Address) -> Result<TokenInfo>;
}

/// Configuration for the node client
#[derive(Debug, Clone)]
pub struct NodeClientConfig {
    pub rpc_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u8,
    pub rate_limit_rps: u32,
}

impl Default for NodeClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            rate_limit_rps: 10, // Be nice to public RPCs
        }
    }
}

impl From<&crate::config::NodeConfig> for NodeClientConfig {
    fn from(cfg: &crate::config::NodeConfig) -> Self {
        Self {
            rpc_url: cfg.rpc_url.clone(),
            timeout_seconds: cfg.timeout_seconds,
            max_retries: cfg.max_retries,
            rate_limit_rps: cfg.rate_limit_rps,
        }
    }
}

/// A client for an EVM JSON-RPC node
pub struct NodeClient {
    web3: Web3<Http>,
    config: NodeClientConfig,
    last_request: Mutex<Option<Instant>>,
}

impl NodeClient {
    /// Create a new node client
    pub fn new(config: NodeClientConfig) -> Result<Self> {
        let url = url::Url::parse(&config.rpc_url)?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let transport = Http::with_client(http_client, url);

        Ok(Self {
            web3: Web3::new(transport),
            config,
            last_request: Mutex::new(None),
        })
    }

    /// Enforce the configured minimum spacing between requests.
    ///
    /// The lock is held across the sleep so concurrent callers queue up
    /// instead of bursting.
    async fn throttle(&self) {
        if self.config.rate_limit_rps == 0 {
            return;
        }
        let min_gap = Duration::from_secs(1) / self.config.rate_limit_rps;
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < min_gap {
                tokio::time::sleep(min_gap - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Issue one RPC call with throttling and bounded retries.
    ///
    /// Only transport failures are retried; RPC-level errors surface
    /// immediately.
    async fn call<T, F, Fut>(&self, method: &'static str, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, web3::Error>>,
    {
        let mut attempt: u8 = 0;
        loop {
            self.throttle().await;
            increment_counter!("chainscope_rpc_calls", "method" => method);
            match op().await {
                Ok(value) => return Ok(value),
                Err(web3::Error::Transport(err)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "RPC {} transport error ({}), retry {}/{}",
                        method,
                        err,
                        attempt,
                        self.config.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(200) * attempt as u32).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[async_trait]
impl ChainRpc for NodeClient {
    async fn latest_block_number(&self) -> Result<u64> {
        let number = self
            .call("eth_blockNumber", || self.web3.eth().block_number())
            .await?;
        Ok(number.as_u64())
    }

    async fn block(&self, id: BlockId) -> Result<Option<Block<H256>>> {
        self.call("eth_getBlock", || self.web3.eth().block(id)).await
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>> {
        self.call("eth_getTransaction", || {
            self.web3.eth().transaction(TransactionId::Hash(hash))
        })
        .await
    }

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>> {
        self.call("eth_getTransactionReceipt", || {
            self.web3.eth().transaction_receipt(hash)
        })
        .await
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.call("eth_getBalance", || self.web3.eth().balance(address, None))
            .await
    }

    async fn code(&self, address: Address) -> Result<Bytes> {
        self.call("eth_getCode", || self.web3.eth().code(address, None))
            .await
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        self.throttle().await;
        increment_counter!("chainscope_rpc_calls", "method" => "erc20_balanceOf");
        erc20::balance_of(&self.web3, token, owner).await
    }

    async fn token_info(&self, token: Address) -> Result<TokenInfo> {
        self.throttle().await;
        increment_counter!("chainscope_rpc_calls", "method" => "erc20_metadata");
        erc20::token_info(&self.web3, token).await
    }
}
