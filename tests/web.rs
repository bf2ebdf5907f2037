//! Route-level tests driving the axum router with an in-memory chain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chainscope::chain::{ChainRpc, TokenInfo};
use chainscope::config::Config;
use chainscope::explorer::Explorer;
use chainscope::web::{self, AppState};
use chainscope::{Error, Result};
use tower::ServiceExt;
use web3::types::{
    Address, Block, BlockId, BlockNumber, Bytes, Transaction, TransactionReceipt, H160, H256,
    U256, U64,
};

/// Three-block chain with one mined transfer in block 1.
#[derive(Default)]
struct FakeChain {
    blocks: Vec<Block<H256>>,
    transactions: HashMap<H256, Transaction>,
    receipts: HashMap<H256, TransactionReceipt>,
    balances: HashMap<Address, U256>,
}

#[async_trait]
impl ChainRpc for FakeChain {
    async fn latest_block_number(&self) -> Result<u64> {
        Ok(self.blocks.len().saturating_sub(1) as u64)
    }

    async fn block(&self, id: BlockId) -> Result<Option<Block<H256>>> {
        let block = match id {
            BlockId::Number(BlockNumber::Number(n)) => self.blocks.get(n.as_u64() as usize),
            BlockId::Hash(hash) => self.blocks.iter().find(|b| b.hash == Some(hash)),
            _ => None,
        };
        Ok(block.cloned())
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>> {
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>> {
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.balances.get(&address).copied().unwrap_or_default())
    }

    async fn code(&self, _address: Address) -> Result<Bytes> {
        Ok(Bytes(Vec::new()))
    }

    async fn token_balance(&self, _token: Address, _owner: Address) -> Result<U256> {
        Err(Error::Other("no tokens on this chain".to_string()))
    }

    async fn token_info(&self, _token: Address) -> Result<TokenInfo> {
        Err(Error::Other("no tokens on this chain".to_string()))
    }
}

const ALICE: &str = "a1";
const TX: &str = "11";

fn fixture() -> FakeChain {
    let alice = H160::repeat_byte(0xa1);
    let bob = H160::repeat_byte(0xb2);
    let tx_hash = H256::repeat_byte(0x11);

    let mut chain = FakeChain::default();
    chain.blocks = vec![
        Block {
            number: Some(U64::from(0u64)),
            hash: Some(H256::from_low_u64_be(0xb000)),
            timestamp: U256::from(1_000u64),
            ..Default::default()
        },
        Block {
            number: Some(U64::from(1u64)),
            hash: Some(H256::from_low_u64_be(0xb001)),
            parent_hash: H256::from_low_u64_be(0xb000),
            timestamp: U256::from(1_010u64),
            transactions: vec![tx_hash],
            ..Default::default()
        },
        Block {
            number: Some(U64::from(2u64)),
            hash: Some(H256::from_low_u64_be(0xb002)),
            parent_hash: H256::from_low_u64_be(0xb001),
            timestamp: U256::from(1_020u64),
            ..Default::default()
        },
    ];
    chain.transactions.insert(
        tx_hash,
        Transaction {
            hash: tx_hash,
            block_number: Some(U64::from(1u64)),
            from: Some(alice),
            to: Some(bob),
            value: U256::exp10(18),
            gas: U256::from(21_000u64),
            ..Default::default()
        },
    );
    chain.receipts.insert(
        tx_hash,
        TransactionReceipt {
            gas_used: Some(U256::from(21_000u64)),
            status: Some(U64::from(1u64)),
            ..Default::default()
        },
    );
    chain.balances.insert(alice, U256::exp10(18));
    chain
}

fn app() -> Router {
    let chain: Arc<dyn ChainRpc> = Arc::new(fixture());
    let config = Config::default();
    let explorer = Explorer::new(chain, config.chain.clone(), config.explorer.clone());
    web::router(Arc::new(AppState::new(explorer, &config)))
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_page_lists_latest_activity() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Latest Blocks"));
    assert!(body.contains("Latest Transactions"));
    assert!(body.contains("/explore-block?str=2"));
    assert!(body.contains(&format!("/search-hash?str=0x{}", TX.repeat(32))));
}

#[tokio::test]
async fn test_search_redirects_by_query_shape() {
    let response = app()
        .oneshot(Request::builder().uri("/search?q=7").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/explore-block?str=7"
    );

    let address_query = format!("/search?q=0x{}", ALICE.repeat(20));
    let response = app()
        .oneshot(Request::builder().uri(&address_query).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("/search-address?str=0x{}", ALICE.repeat(20))
    );

    let hash_query = format!("/search?q=0x{}", TX.repeat(32));
    let response = app()
        .oneshot(Request::builder().uri(&hash_query).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("/search-hash?str=0x{}", TX.repeat(32))
    );
}

#[tokio::test]
async fn test_search_rejects_empty_and_invalid_input() {
    let (status, body) = get("/search?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please type something to search"));

    let (status, body) = get("/search?q=nonsense").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid search input"));
}

#[tokio::test]
async fn test_block_route_rejects_garbage() {
    let (status, body) = get("/explore-block?str=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid search input"));

    let (_, body) = get("/explore-block").await;
    assert!(body.contains("Invalid search input"));
}

#[tokio::test]
async fn test_block_route_unknown_number() {
    let (status, body) = get("/explore-block?str=99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Not found: block 99"));
}

#[tokio::test]
async fn test_block_route_renders_details() {
    let (status, body) = get("/explore-block?str=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Explore Block: 1"));
    assert!(body.contains("Parent Hash"));
    assert!(body.contains(&format!("/search-hash?str=0x{}", TX.repeat(32))));
}

#[tokio::test]
async fn test_hash_route_renders_transaction() {
    let uri = format!("/search-hash?str=0x{}", TX.repeat(32));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("Hash: 0x{}", TX.repeat(32))));
    assert!(body.contains("Transaction Receipt Event Logs"));
    assert!(body.contains("1.0 ETH"));
}

#[tokio::test]
async fn test_hash_route_falls_back_to_block_lookup() {
    let uri = format!("/search-hash?str=0x{:064x}", 0xb001u64);
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Explore Block: 1"));
}

#[tokio::test]
async fn test_hash_route_unknown_hash() {
    let uri = format!("/search-hash?str=0x{}", "ee".repeat(32));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No transaction or block found"));
}

#[tokio::test]
async fn test_hash_route_rejects_bad_input() {
    let (_, body) = get("/search-hash?str=0x1234").await;
    assert!(body.contains("Invalid search input"));
}

#[tokio::test]
async fn test_address_route_renders_balance_and_history() {
    let uri = format!("/search-address?str=0x{}", ALICE.repeat(20));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("Address: 0x{}", ALICE.repeat(20))));
    assert!(body.contains("1.0 ETH"));
    assert!(body.contains("Latest Transactions:"));
}

#[tokio::test]
async fn test_address_route_rejects_bad_input() {
    let (_, body) = get("/search-address?str=0x1234").await;
    assert!(body.contains("Invalid search input"));
}

#[tokio::test]
async fn test_healthz() {
    let (status, body) = get("/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_metrics_endpoint_responds() {
    let (status, _) = get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get("/definitely-not-a-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
