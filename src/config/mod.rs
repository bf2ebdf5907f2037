//! Configuration module for the explorer

use crate::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration file version
    pub version: String,

    /// JSON-RPC node configuration
    pub node: NodeConfig,

    /// Chain presentation configuration
    pub chain: ChainConfig,

    /// Explorer behaviour configuration
    pub explorer: ExplorerConfig,

    /// HTTP server configuration
    pub server: ServerConfig,
}

/// JSON-RPC node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Timeout for RPC requests in seconds
    pub timeout_seconds: u64,

    /// Maximum number of retries for failed requests
    pub max_retries: u8,

    /// Rate limit in requests per second (0 disables throttling)
    #[serde(default = "default_rate_limit_rps")]
    pub rate_limit_rps: u32,
}

/// Chain presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Symbol shown next to native-currency amounts (e.g. ETH)
    pub native_symbol: String,

    /// Hex prefix (no 0x) matched against account code during token
    /// contract discovery. The default is the classic Solidity
    /// dispatcher prologue.
    #[serde(default = "default_token_code_prefix")]
    pub token_code_prefix: String,
}

/// Explorer behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Rows per page on paginated tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Number of recent blocks shown on the home page
    #[serde(default = "default_home_block_count")]
    pub home_block_count: u64,

    /// Number of recent transactions shown on the home page
    #[serde(default = "default_home_transaction_count")]
    pub home_transaction_count: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind (host:port)
    pub bind: String,

    /// Brand name shown in the navbar and footer
    #[serde(default = "default_brand_name")]
    pub brand_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            node: NodeConfig::default(),
            chain: ChainConfig::default(),
            explorer: ExplorerConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            rate_limit_rps: default_rate_limit_rps(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            native_symbol: "ETH".to_string(),
            token_code_prefix: default_token_code_prefix(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            home_block_count: default_home_block_count(),
            home_transaction_count: default_home_transaction_count(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            brand_name: default_brand_name(),
        }
    }
}

// --------- Helper default functions for serde ---------
fn default_rate_limit_rps() -> u32 {
    10
}
fn default_token_code_prefix() -> String {
    "60606040".to_string()
}
fn default_page_size() -> usize {
    20
}
fn default_home_block_count() -> u64 {
    20
}
fn default_home_transaction_count() -> usize {
    40
}
fn default_brand_name() -> String {
    "Chainscope".to_string()
}

impl Config {
    /// Serialize default config to TOML string
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).expect("serialize default config")
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {:?}: {}", path.as_ref(), e))
        })?;
        let mut cfg: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;
        cfg.merge_env()?;
        Ok(cfg)
    }

    /// Save the configuration to a file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            Error::ConfigError(format!("Failed to write config file {:?}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate the configuration for required fields and reasonable values
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::ConfigError(
                "Config version must be set (e.g., '0.1.0')".to_string(),
            ));
        }
        // Node config
        if self.node.rpc_url.trim().is_empty() {
            return Err(Error::ConfigError("Node RPC URL must be set".to_string()));
        }
        if let Err(e) = url::Url::parse(&self.node.rpc_url) {
            return Err(Error::ConfigError(format!(
                "Node RPC URL is not a valid URL: {}",
                e
            )));
        }
        if self.node.timeout_seconds == 0 {
            return Err(Error::ConfigError(
                "Node timeout_seconds must be > 0".to_string(),
            ));
        }
        // Chain config
        if self.chain.native_symbol.trim().is_empty() {
            return Err(Error::ConfigError("Native symbol must be set".to_string()));
        }
        if hex::decode(&self.chain.token_code_prefix).is_err() {
            return Err(Error::ConfigError(
                "token_code_prefix must be an even-length hex string without 0x".to_string(),
            ));
        }
        // Explorer config
        if self.explorer.page_size == 0 {
            return Err(Error::ConfigError("page_size must be > 0".to_string()));
        }
        // Server config
        if self.server.bind.trim().is_empty() {
            return Err(Error::ConfigError("Server bind address must be set".to_string()));
        }
        Ok(())
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        // Try to load from current directory
        if let Ok(config) = Self::from_file("config.toml") {
            return Ok(config);
        }

        // Try to load from user config directory
        if let Some(mut path) = dirs::config_dir() {
            path.push("chainscope");
            path.push("config.toml");
            if path.exists() {
                return Self::from_file(path);
            }
        }

        // Return default config if no config file found
        let mut config = Self::default();
        config.merge_env()?;
        Ok(config)
    }

    /// Merge environment variables into the configuration
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(rpc_url) = env::var("CHAINSCOPE_RPC_URL") {
            self.node.rpc_url = rpc_url;
        }

        if let Ok(bind) = env::var("CHAINSCOPE_BIND") {
            self.server.bind = bind;
        }

        if let Ok(symbol) = env::var("CHAINSCOPE_NATIVE_SYMBOL") {
            self.chain.native_symbol = symbol;
        }

        if let Ok(brand) = env::var("CHAINSCOPE_BRAND_NAME") {
            self.server.brand_name = brand;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.node.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.chain.native_symbol, "ETH");
        assert_eq!(config.explorer.page_size, 20);
        assert_eq!(config.explorer.home_transaction_count, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() {
        // from_file merges env vars, so pin them unset for this test
        temp_env::with_vars(vec![("CHAINSCOPE_RPC_URL", None::<&str>)], || {
            let temp_dir = tempdir().unwrap();
            let config_path = temp_dir.path().join("config.toml");

            let mut config = Config::default();
            config.node.rpc_url = "http://10.0.0.5:8545".to_string();

            // Save config
            config.save(&config_path).unwrap();

            // Load config
            let loaded_config = Config::from_file(&config_path).unwrap();
            assert_eq!(loaded_config.node.rpc_url, "http://10.0.0.5:8545");
        });
    }

    #[test]
    fn test_merge_env() {
        temp_env::with_vars(
            vec![
                ("CHAINSCOPE_RPC_URL", Some("http://10.0.0.5:8545")),
                ("CHAINSCOPE_NATIVE_SYMBOL", Some("DEV")),
            ],
            || {
                let mut config = Config::default();
                config.merge_env().unwrap();

                assert_eq!(config.node.rpc_url, "http://10.0.0.5:8545");
                assert_eq!(config.chain.native_symbol, "DEV");
            },
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.node.rpc_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chain.token_code_prefix = "0x606060".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.explorer.page_size = 0;
        assert!(config.validate().is_err());
    }
}
