//! Brute-force chain scans.
//!
//! There is no index and no cache behind these: every call walks the chain
//! block by block through the RPC seam. Fine on the small private chains
//! this explorer targets, ruinous on anything public.

use std::collections::HashSet;

use metrics::increment_counter;
use web3::types::{Address, BlockId};

use crate::chain::ChainRpc;
use crate::utils::error::{Error, Result};

use super::types::AddressTransaction;

/// Walk blocks 1..=latest and collect distinct call targets whose deployed
/// code starts with `prefix_hex`, in first-seen order.
///
/// Genesis is skipped; only targets of mined calls are considered. Account
/// code is fetched at most once per address since `code` reads latest
/// state and cannot change mid-scan.
pub async fn discover_token_contracts(
    chain: &dyn ChainRpc,
    prefix_hex: &str,
) -> Result<Vec<Address>> {
    let prefix = hex::decode(prefix_hex)
        .map_err(|e| Error::ConfigError(format!("bad token code prefix: {}", e)))?;
    let latest = chain.latest_block_number().await?;

    let mut seen: HashSet<Address> = HashSet::new();
    let mut found: Vec<Address> = Vec::new();

    for number in 1..=latest {
        let block = match chain.block(BlockId::Number(number.into())).await? {
            Some(block) => block,
            None => continue,
        };
        increment_counter!("chainscope_scanned_blocks", "scan" => "token_discovery");

        for hash in block.transactions {
            let tx = match chain.transaction(hash).await? {
                Some(tx) => tx,
                None => continue,
            };
            let target = match tx.to {
                Some(target) => target,
                None => continue,
            };
            if !seen.insert(target) {
                continue;
            }
            let code = chain.code(target).await?;
            if !code.0.is_empty() && code.0.starts_with(&prefix) {
                log::debug!("token candidate {:?} first called in block {}", target, number);
                increment_counter!("chainscope_token_contracts_found");
                found.push(target);
            }
        }
    }

    log::debug!(
        "token discovery scanned {} blocks, found {} candidates",
        latest,
        found.len()
    );
    Ok(found)
}

/// Walk blocks 0..=latest and collect every transaction sent from or to
/// `address`, in chain order, enriched with its receipt.
pub async fn collect_address_transactions(
    chain: &dyn ChainRpc,
    address: Address,
) -> Result<Vec<AddressTransaction>> {
    let latest = chain.latest_block_number().await?;
    let mut history: Vec<AddressTransaction> = Vec::new();

    for number in 0..=latest {
        let block = match chain.block(BlockId::Number(number.into())).await? {
            Some(block) => block,
            None => continue,
        };
        increment_counter!("chainscope_scanned_blocks", "scan" => "address_history");
        let timestamp = block.timestamp.low_u64();

        for hash in block.transactions {
            let tx = match chain.transaction(hash).await? {
                Some(tx) => tx,
                None => continue,
            };
            if tx.from != Some(address) && tx.to != Some(address) {
                continue;
            }

            let receipt = chain.transaction_receipt(hash).await?;
            let (gas_used, contract_address, status) = match receipt {
                Some(receipt) => (
                    receipt.gas_used,
                    receipt.contract_address,
                    receipt.status.map(|s| s.as_u64()),
                ),
                None => (None, None, None),
            };

            history.push(AddressTransaction {
                hash,
                timestamp,
                from: tx.from,
                to: tx.to,
                value: tx.value,
                gas_limit: tx.gas,
                gas_used,
                contract_address,
                status,
            });
        }
    }

    log::debug!(
        "history scan for {:?} visited {} blocks, matched {} transactions",
        address,
        latest + 1,
        history.len()
    );
    Ok(history)
}
