//! HTML rendering.
//!
//! Pages are plain Bulma markup assembled with `format!`; no templates and
//! no client-side scripting. Every chain-sourced or user-sourced string is
//! escaped before interpolation (addresses and hashes are rendered from
//! bytes and are safe by construction).

use chrono::{Datelike, Utc};
use web3::types::{Address, H256, U256};

use crate::explorer::{AddressView, BlockView, HomeView, TransactionView};
use crate::utils::format;
use crate::web::pagination;

/// Strings every page needs
#[derive(Debug, Clone)]
pub struct PageContext {
    pub brand_name: String,
    pub native_symbol: String,
}

/// Replace the five HTML metacharacters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared document shell: navbar, search form, content, footer.
fn layout(ctx: &PageContext, title: &str, content: &str) -> String {
    let brand = escape_html(&ctx.brand_name);
    let title = escape_html(title);
    let year = Utc::now().year();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css">
<link rel="stylesheet" href="https://cdn.lineicons.com/4.0/lineicons.css">
</head>
<body>
<nav class="navbar is-link" role="navigation" aria-label="main navigation">
    <div class="navbar-brand">
        <a class="navbar-item has-text-weight-bold" href="/">{brand}</a>
    </div>
    <div class="navbar-menu">
        <div class="navbar-end">
            <div class="navbar-item">
                <a href="/" class="lni lni-home"> Home</a>
            </div>
        </div>
    </div>
</nav>
<div class="container mt-4">
    <div class="columns is-centered">
        <div class="column is-half">
            <form action="/search" method="get">
                <div class="field has-addons">
                    <div class="control is-expanded">
                        <input class="input is-primary" type="text" name="q" placeholder="Search Hash, Block number, Address etc">
                    </div>
                    <div class="control">
                        <button type="submit" class="button is-primary">Search</button>
                    </div>
                </div>
            </form>
        </div>
    </div>
{content}
</div>
<footer class="footer has-background-dark has-text-light has-text-centered mt-6">
    <div class="content">
        <p>
            &copy; {year} {brand}. All rights reserved.
            <br>
            <small style="color: #ccc">Disclaimer: This website provides information on the blockchain and is for informational purposes only. It does not provide financial or investment advice.</small>
        </p>
    </div>
</footer>
</body>
</html>"##
    )
}

fn address_link(address: &Address) -> String {
    let hex = format::hex_h160(address);
    format!(r#"<a href="/search-address?str={hex}">{hex}</a>"#)
}

fn opt_address_link(address: &Option<Address>) -> String {
    match address {
        Some(address) => address_link(address),
        None => "-".to_string(),
    }
}

fn hash_link(hash: &H256) -> String {
    let hex = format::hex_h256(hash);
    format!(r#"<a href="/search-hash?str={hex}">{hex}</a>"#)
}

/// Relative age, or a dash for absent/zero timestamps (genesis and
/// pending entries).
fn age_cell(timestamp: Option<u64>) -> String {
    match timestamp {
        Some(t) if t > 0 => format::age_from_now(t),
        _ => "-".to_string(),
    }
}

fn opt_u256(value: &Option<U256>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn status_cell(status: Option<u64>) -> String {
    match status {
        Some(1) => "Success".to_string(),
        Some(0) => "Failed".to_string(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

/// Home: latest blocks and latest transactions, two cards side by side.
pub fn home_page(ctx: &PageContext, view: &HomeView) -> String {
    let mut block_rows = String::new();
    for block in &view.blocks {
        block_rows.push_str(&format!(
            r#"<tr>
    <td><i class="lni lni-layout"></i> {number}</td>
    <td>{age}</td>
    <td><a href="/explore-block?str={number}" class="button is-link is-small">Scan &rarr;</a></td>
</tr>
"#,
            number = block.number,
            age = age_cell(Some(block.timestamp)),
        ));
    }

    let mut transaction_rows = String::new();
    for txn in &view.transactions {
        let hex = format::hex_h256(&txn.hash);
        transaction_rows.push_str(&format!(
            r#"<tr>
    <td><i class="lni lni-fitbit"></i> {hex}</td>
    <td>{age}</td>
    <td><a href="/search-hash?str={hex}" class="button is-warning is-small">View &rarr;</a></td>
</tr>
"#,
            age = age_cell(Some(txn.timestamp)),
        ));
    }

    let content = format!(
        r#"<div class="section">
    <div class="columns">
        <div class="column">
            <div class="card">
                <header class="card-header">
                    <p class="card-header-title is-centered">Latest Blocks</p>
                </header>
                <div class="card-content">
                    <div class="content">
                        <table class="table is-fullwidth">
                            <thead><tr><th>Block</th><th></th><th></th></tr></thead>
                            <tbody>
{block_rows}</tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
        <div class="column">
            <div class="card">
                <header class="card-header">
                    <p class="card-header-title is-centered">Latest Transactions</p>
                </header>
                <div class="card-content">
                    <div class="content">
                        <table class="table is-fullwidth">
                            <thead><tr><th>Hash</th><th></th><th></th></tr></thead>
                            <tbody>
{transaction_rows}</tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    </div>
</div>"#
    );

    layout(ctx, "Explore the Blockchain", &content)
}

/// Block details plus its transactions, paginated with numbered links.
pub fn block_page(ctx: &PageContext, view: &BlockView, page: usize, page_size: usize) -> String {
    let number_text = match view.number {
        Some(number) => number.to_string(),
        None => "pending".to_string(),
    };
    let hash_cell = match &view.hash {
        Some(hash) => hash_link(hash),
        None => "-".to_string(),
    };
    let nonce_cell = match &view.nonce {
        Some(nonce) => format::hex_bytes(nonce.as_bytes()),
        None => "-".to_string(),
    };

    let paged = pagination::slice(&view.transactions, page, page_size);
    let mut transaction_rows = String::new();
    for txn in paged.items {
        transaction_rows.push_str(&format!(
            r#"<tr>
    <td>{hash}</td>
    <td>{from}</td>
    <td>{to}</td>
</tr>
"#,
            hash = hash_link(&txn.hash),
            from = opt_address_link(&txn.from),
            to = opt_address_link(&txn.to),
        ));
    }

    let mut page_links = String::new();
    for p in 1..=paged.total_pages {
        let current = if p == paged.page { " is-current" } else { "" };
        page_links.push_str(&format!(
            r#"<li><a class="pagination-link{current}" href="/explore-block?str={number_text}&page={p}">{p}</a></li>
"#
        ));
    }

    let content = format!(
        r#"<div class="section">
    <div class="container">
        <h2 class="title">Explore Block: {number_text}</h2>
        <hr>
        <div class="table-container">
            <table class="table is-fullwidth is-striped">
                <tbody>
                    <tr><th>Block Number</th><td>{number_text}</td></tr>
                    <tr><th>Timestamp</th><td>{age}</td></tr>
                    <tr><th>Hash</th><td>{hash_cell}</td></tr>
                    <tr><th>Parent Hash</th><td>{parent}</td></tr>
                    <tr><th>Nonce</th><td>{nonce_cell}</td></tr>
                    <tr><th>Difficulty</th><td>{difficulty}</td></tr>
                    <tr><th>Gas Limit</th><td>{gas_limit}</td></tr>
                    <tr><th>Gas Used</th><td>{gas_used}</td></tr>
                </tbody>
            </table>
        </div>
        <h3 class="subtitle">Transactions</h3>
        <div class="table-container">
            <table class="table is-fullwidth is-striped">
                <thead><tr><th>Transaction Hash</th><th>From</th><th>To</th></tr></thead>
                <tbody>
{transaction_rows}</tbody>
            </table>
        </div>
        <nav class="pagination is-centered" role="navigation" aria-label="pagination">
            <ul class="pagination-list">
{page_links}</ul>
        </nav>
    </div>
</div>"#,
        age = age_cell(Some(view.timestamp)),
        parent = hash_link(&view.parent_hash),
        difficulty = view.difficulty,
        gas_limit = view.gas_limit,
        gas_used = view.gas_used,
    );

    layout(ctx, &format!("Explore Block: {}", number_text), &content)
}

/// Transaction details and its receipt event logs.
pub fn transaction_page(ctx: &PageContext, view: &TransactionView) -> String {
    let symbol = escape_html(&ctx.native_symbol);
    let hex = format::hex_h256(&view.hash);

    let block_number_cell = match view.block_number {
        Some(number) => number.to_string(),
        None => "-".to_string(),
    };
    let gas_price_cell = match view.gas_price {
        Some(price) => format!("{} {}", format::format_ether(price), symbol),
        None => "-".to_string(),
    };
    let index_cell = match view.transaction_index {
        Some(index) => index.to_string(),
        None => "-".to_string(),
    };

    let mut log_rows = String::new();
    for log in &view.logs {
        log_rows.push_str(&format!(
            r#"<tr>
    <td>{index}</td>
    <td>{address}</td>
    <td class="has-text-break">{data}</td>
</tr>
"#,
            index = log.index,
            address = address_link(&log.address),
            data = format::hex_bytes(&log.data),
        ));
    }

    let content = format!(
        r#"<div class="section">
    <div class="container">
        <h4 class="is-size-5">Hash: {hex}</h4>
        <hr>
        <div class="table-container">
            <table class="table is-fullwidth">
                <tbody>
                    <tr><th>Block Number</th><td>{block_number_cell}</td></tr>
                    <tr><th>Timestamp</th><td>{age}</td></tr>
                    <tr><th>From</th><td>{from}</td></tr>
                    <tr><th>To</th><td>{to}</td></tr>
                    <tr><th>Value</th><td>{value} {symbol}</td></tr>
                    <tr><th>Gas Price</th><td>{gas_price_cell}</td></tr>
                    <tr><th>Gas Limit</th><td>{gas_limit}</td></tr>
                    <tr><th>Gas Used</th><td>{gas_used}</td></tr>
                    <tr><th>Nonce</th><td>{nonce}</td></tr>
                    <tr><th>Transaction Index</th><td>{index_cell}</td></tr>
                    <tr><th>Input Data</th><td class="has-text-break">{input}</td></tr>
                </tbody>
            </table>
        </div>
        <h4 class="is-size-5">Transaction Receipt Event Logs</h4>
        <hr>
        <div class="table-container">
            <table class="table is-fullwidth">
                <thead><tr><th>Index</th><th>Address</th><th>Data</th></tr></thead>
                <tbody>
{log_rows}</tbody>
            </table>
        </div>
    </div>
</div>"#,
        age = age_cell(view.timestamp),
        from = opt_address_link(&view.from),
        to = opt_address_link(&view.to),
        value = format::format_ether(view.value),
        gas_limit = view.gas_limit,
        gas_used = opt_u256(&view.gas_used),
        nonce = view.nonce,
        input = format::hex_bytes(&view.input),
    );

    layout(ctx, &format!("Hash: {}", hex), &content)
}

/// Address balance, token balances and scanned history with
/// Previous/Next pagination.
pub fn address_page(ctx: &PageContext, view: &AddressView, page: usize, page_size: usize) -> String {
    let symbol = escape_html(&ctx.native_symbol);
    let hex = format::hex_h160(&view.address);

    let mut token_list = String::new();
    for token in &view.tokens {
        token_list.push_str(&format!(
            r#"<div>
    <p>Token: {symbol}</p>
    <p>Balance: {balance}</p>
</div>
"#,
            symbol = escape_html(&token.symbol),
            balance = escape_html(&token.balance),
        ));
    }

    let paged = pagination::slice(&view.transactions, page, page_size);
    let mut transaction_rows = String::new();
    for txn in paged.items {
        let to_cell = match (&txn.to, &txn.contract_address) {
            (Some(to), _) => format::hex_h160(to),
            (None, Some(contract)) => format!("{} (created)", format::hex_h160(contract)),
            (None, None) => "-".to_string(),
        };
        let from_cell = match &txn.from {
            Some(from) => format::hex_h160(from),
            None => "-".to_string(),
        };
        let gas_cell = format!("{} / {}", opt_u256(&txn.gas_used), txn.gas_limit);
        transaction_rows.push_str(&format!(
            r#"<tr>
    <td>{hash}</td>
    <td>{age}</td>
    <td>{from_cell}</td>
    <td>{to_cell}</td>
    <td>{value} {symbol}</td>
    <td>{gas_cell}</td>
    <td>{status}</td>
</tr>
"#,
            hash = hash_link(&txn.hash),
            age = age_cell(Some(txn.timestamp)),
            value = format::format_ether(txn.value),
            status = status_cell(txn.status),
        ));
    }

    let previous = if paged.has_previous() {
        format!(
            r#"<a class="pagination-previous" href="/search-address?str={hex}&page={}">Previous</a>"#,
            paged.page - 1
        )
    } else {
        r#"<a class="pagination-previous" disabled>Previous</a>"#.to_string()
    };
    let next = if paged.has_next() {
        format!(
            r#"<a class="pagination-next" href="/search-address?str={hex}&page={}">Next</a>"#,
            paged.page + 1
        )
    } else {
        r#"<a class="pagination-next" disabled>Next</a>"#.to_string()
    };

    let content = format!(
        r#"<div class="section">
    <div class="container">
        <h4 class="is-size-5">Address: {hex}</h4>
        <hr>
        <h5>Balance: <strong>{balance} {symbol}</strong></h5>
        <div>
            <h5>Token Balances:</h5>
{token_list}        </div>
        <div class="mt-4">
            <h5>Latest Transactions:</h5>
            <div class="table-container">
                <table class="table is-fullwidth">
                    <thead>
                        <tr>
                            <th>Transaction Hash</th>
                            <th>Timestamp</th>
                            <th>From</th>
                            <th>To</th>
                            <th>Value</th>
                            <th>Gas (Used / Limit)</th>
                            <th>Status</th>
                        </tr>
                    </thead>
                    <tbody>
{transaction_rows}</tbody>
                </table>
            </div>
            <nav class="pagination" role="navigation" aria-label="pagination">
                {previous}
                {next}
            </nav>
        </div>
    </div>
</div>"#,
        balance = format::format_ether(view.balance),
    );

    layout(ctx, &format!("Address: {}", hex), &content)
}

/// Shared error surface; the message replaces the alert() of a
/// client-rendered explorer.
pub fn error_page(ctx: &PageContext, message: &str) -> String {
    let content = format!(
        r#"<div class="section">
    <div class="container">
        <div class="notification is-danger">
            <strong>{}</strong>
        </div>
    </div>
</div>"#,
        escape_html(message)
    );

    layout(ctx, "Error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::{
        AddressTransaction, BlockSummary, BlockTransaction, TokenBalance, TransactionSummary,
    };
    use web3::types::H160;

    fn ctx() -> PageContext {
        PageContext {
            brand_name: "Chainscope".to_string(),
            native_symbol: "ETH".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_home_page_links() {
        let view = HomeView {
            blocks: vec![BlockSummary { number: 7, timestamp: 0 }],
            transactions: vec![TransactionSummary {
                hash: H256::repeat_byte(0xaa),
                timestamp: 0,
            }],
        };
        let html = home_page(&ctx(), &view);
        assert!(html.contains("/explore-block?str=7"));
        assert!(html.contains(&format!("/search-hash?str=0x{}", "aa".repeat(32))));
        assert!(html.contains("Latest Blocks"));
        assert!(html.contains("Latest Transactions"));
    }

    #[test]
    fn test_block_page_marks_current_page() {
        let transactions = (0..45)
            .map(|i| BlockTransaction {
                hash: H256::repeat_byte(i as u8),
                from: Some(H160::repeat_byte(1)),
                to: None,
            })
            .collect();
        let view = BlockView {
            number: Some(3),
            hash: Some(H256::repeat_byte(0xbb)),
            parent_hash: H256::repeat_byte(0xcc),
            timestamp: 1_000,
            nonce: None,
            difficulty: U256::zero(),
            gas_limit: U256::from(8_000_000u64),
            gas_used: U256::from(21_000u64),
            transactions,
        };
        let html = block_page(&ctx(), &view, 2, 20);
        assert!(html.contains(r#"class="pagination-link is-current" href="/explore-block?str=3&page=2""#));
        assert!(html.contains("/explore-block?str=3&page=3"));
        // page 2 holds items 20..40
        assert!(html.contains(&format!("/search-hash?str=0x{}", "14".repeat(32))));
        assert!(!html.contains(&format!("/search-hash?str=0x{}", "00".repeat(32))));
        assert!(!html.contains(&format!("/search-hash?str=0x{}", "28".repeat(32))));
    }

    #[test]
    fn test_address_page_pagination_edges() {
        let transactions: Vec<AddressTransaction> = (0..25)
            .map(|i| AddressTransaction {
                hash: H256::repeat_byte(i as u8),
                timestamp: 1_000,
                from: Some(H160::repeat_byte(2)),
                to: Some(H160::repeat_byte(3)),
                value: U256::zero(),
                gas_limit: U256::from(21_000u64),
                gas_used: Some(U256::from(21_000u64)),
                contract_address: None,
                status: Some(1),
            })
            .collect();
        let view = AddressView {
            address: H160::repeat_byte(9),
            balance: U256::exp10(18),
            tokens: vec![TokenBalance {
                contract: H160::repeat_byte(4),
                symbol: "TKN".to_string(),
                balance: "5.0".to_string(),
            }],
            transactions,
        };

        let first = address_page(&ctx(), &view, 1, 20);
        assert!(first.contains(r#"<a class="pagination-previous" disabled>Previous</a>"#));
        assert!(first.contains("&page=2"));
        assert!(first.contains("Token: TKN"));
        assert!(first.contains("Balance: <strong>1.0 ETH</strong>"));

        let last = address_page(&ctx(), &view, 2, 20);
        assert!(last.contains(r#"<a class="pagination-next" disabled>Next</a>"#));
        assert!(last.contains("Success"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(&ctx(), "<script>boom</script>");
        assert!(html.contains("&lt;script&gt;boom&lt;/script&gt;"));
        assert!(!html.contains("<script>boom"));
    }
}
