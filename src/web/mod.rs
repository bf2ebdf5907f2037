//! HTTP surface: axum routes for the explorer pages plus health and
//! metrics endpoints.
//!
//! Handlers never panic; every failure is rendered through the shared
//! error page so the browser always gets a response.

pub mod pagination;
pub mod render;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::config::Config;
use crate::explorer::Explorer;
use crate::search::{self, SearchTarget};
use crate::utils::error::Error;
use crate::utils::format;

/// Shared handler state
pub struct AppState {
    pub explorer: Explorer,
    pub page_size: usize,
    pub context: render::PageContext,
}

impl AppState {
    pub fn new(explorer: Explorer, config: &Config) -> Self {
        Self {
            explorer,
            page_size: config.explorer.page_size,
            context: render::PageContext {
                brand_name: config.server.brand_name.clone(),
                native_symbol: config.chain.native_symbol.clone(),
            },
        }
    }
}

/// Build the explorer router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/explore-block", get(block_handler))
        .route("/search-hash", get(hash_handler))
        .route("/search-address", get(address_handler))
        .route("/search", get(search_handler))
        .route("/healthz", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Query string shared by the page routes: `?str=...&page=N`.
#[derive(Debug, Deserialize)]
struct StrQuery {
    #[serde(rename = "str")]
    value: Option<String>,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.explorer.home().await {
        Ok(view) => Html(render::home_page(&state.context, &view)),
        Err(err) => {
            log::error!("Failed to build home page: {}", err);
            Html(render::error_page(&state.context, &err.to_string()))
        }
    }
}

async fn block_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StrQuery>,
) -> Html<String> {
    let raw = query.value.unwrap_or_default();
    let number = match raw.trim().parse::<u64>() {
        Ok(number) => number,
        Err(_) => return Html(render::error_page(&state.context, "Invalid search input")),
    };
    let page = query.page.unwrap_or(1);

    match state.explorer.block_by_number(number).await {
        Ok(view) => Html(render::block_page(&state.context, &view, page, state.page_size)),
        Err(err) => {
            log::error!("Failed to load block {}: {}", number, err);
            Html(render::error_page(&state.context, &err.to_string()))
        }
    }
}

/// Transaction lookup. A hash that is not a transaction may still be a
/// block hash, so fall back to a block lookup before giving up.
async fn hash_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StrQuery>,
) -> Html<String> {
    let raw = query.value.unwrap_or_default();
    let hash = match search::classify(&raw) {
        SearchTarget::Hash(hash) => hash,
        _ => return Html(render::error_page(&state.context, "Invalid search input")),
    };

    match state.explorer.transaction(hash).await {
        Ok(view) => Html(render::transaction_page(&state.context, &view)),
        Err(Error::NotFound(_)) => match state.explorer.block_by_hash(hash).await {
            Ok(Some(view)) => Html(render::block_page(&state.context, &view, 1, state.page_size)),
            Ok(None) => Html(render::error_page(
                &state.context,
                &format!(
                    "No transaction or block found for {}",
                    format::hex_h256(&hash)
                ),
            )),
            Err(err) => {
                log::error!("Block lookup by hash failed: {}", err);
                Html(render::error_page(&state.context, &err.to_string()))
            }
        },
        Err(err) => {
            log::error!("Transaction lookup failed: {}", err);
            Html(render::error_page(&state.context, &err.to_string()))
        }
    }
}

async fn address_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StrQuery>,
) -> Html<String> {
    let raw = query.value.unwrap_or_default();
    let address = match search::classify(&raw) {
        SearchTarget::Address(address) => address,
        _ => return Html(render::error_page(&state.context, "Invalid search input")),
    };
    let page = query.page.unwrap_or(1);

    match state.explorer.address(address).await {
        Ok(view) => Html(render::address_page(&state.context, &view, page, state.page_size)),
        Err(err) => {
            log::error!("Failed to load address page: {}", err);
            Html(render::error_page(&state.context, &err.to_string()))
        }
    }
}

/// Search box dispatch: redirect to the page matching the query shape.
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match search::classify(&query.q) {
        | SearchTarget::Address(address) => {
            Redirect::to(&format!("/search-address?str={}", format::hex_h160(&address)))
                .into_response()
        }
        | SearchTarget::Hash(hash) => {
            Redirect::to(&format!("/search-hash?str={}", format::hex_h256(&hash)))
                .into_response()
        }
        | SearchTarget::Block(number) => {
            Redirect::to(&format!("/explore-block?str={}", number)).into_response()
        }
        | SearchTarget::Empty => {
            Html(render::error_page(&state.context, "Please type something to search"))
                .into_response()
        }
        | SearchTarget::Invalid => {
            Html(render::error_page(&state.context, "Invalid search input")).into_response()
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics_handler() -> String {
    match crate::metrics::try_handle() {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}
