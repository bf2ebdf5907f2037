//! # Chainscope
//! Main library file for Chainscope
//! A server-rendered block explorer for EVM JSON-RPC nodes.

pub use crate::utils::error::{Error, Result};

pub mod chain;
pub mod config;
pub mod explorer;
pub mod metrics;
pub mod search;
pub mod utils;
pub mod web;
