//! Controller configuration
//!
//! Loaded from environment variables (with optional .env file). Validation
//! runs before any client is constructed, so a missing endpoint or a
//! malformed credential never results in a network call.

use eyre::{eyre, Result, WrapErr};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crosschain_rs::{validate_private_key, TokenParams};

/// Demo defaults, matching the token the pipeline was built around.
const DEFAULT_TOKEN_NAME: &str = "Hackathon Demo Token";
const DEFAULT_TOKEN_SYMBOL: &str = "HDT";
const DEFAULT_TOKEN_DECIMALS: u8 = 6;
const DEFAULT_TOKEN_MAX_SUPPLY: &str = "1000000000000";
const DEFAULT_TOKEN_TRANSFER_FEE: u16 = 500;
/// 123 tokens at 6 decimals, in smallest units.
const DEFAULT_BRIDGE_AMOUNT: u128 = 123_000_000;
const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Main configuration for the controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub xrpl: XrplConfig,
    pub evm: EvmConfig,
    pub token: TokenParams,
    /// Amount to bridge, in the token's smallest unit.
    pub bridge_amount: u128,
    /// Root directory holding the compiled mirror contract artifact.
    pub artifacts_dir: PathBuf,
}

/// XRPL configuration
#[derive(Clone)]
pub struct XrplConfig {
    pub rpc_url: String,
    pub account_address: String,
    pub account_secret: String,
}

/// Custom Debug that redacts the account secret.
impl fmt::Debug for XrplConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XrplConfig")
            .field("rpc_url", &self.rpc_url)
            .field("account_address", &self.account_address)
            .field("account_secret", &"<redacted>")
            .finish()
    }
}

/// EVM sidechain configuration
#[derive(Clone)]
pub struct EvmConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: String,
}

/// Custom Debug that redacts the private key.
impl fmt::Debug for EvmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmConfig")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables.
    /// Loads .env file if present, then reads from environment.
    pub fn load() -> Result<Self> {
        Self::load_from_file(".env").or_else(|_| Self::load_from_env())
    }

    /// Load from a specific .env file path.
    pub fn load_from_file(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            dotenvy::from_filename(path)
                .wrap_err_with(|| format!("Failed to load .env file from {}", path))?;
        }
        Self::load_from_env()
    }

    fn load_from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a key/value lookup. Split from the env
    /// reader so tests can feed values without touching process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| eyre!("{} environment variable is required", key))
        };

        let xrpl = XrplConfig {
            rpc_url: required("XRPL_RPC_URL")?,
            account_address: required("XRPL_ACCOUNT_ADDRESS")?,
            account_secret: required("XRPL_ACCOUNT_SECRET")?,
        };

        let evm = EvmConfig {
            rpc_url: required("EVM_RPC_URL")?,
            chain_id: required("EVM_CHAIN_ID")?
                .parse()
                .wrap_err("EVM_CHAIN_ID must be a valid u64")?,
            private_key: required("EVM_PRIVATE_KEY")?,
        };

        let token = TokenParams {
            name: lookup("TOKEN_NAME").unwrap_or_else(|| DEFAULT_TOKEN_NAME.to_string()),
            symbol: lookup("TOKEN_SYMBOL").unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.to_string()),
            decimals: lookup("TOKEN_DECIMALS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_DECIMALS),
            max_supply: lookup("TOKEN_MAX_SUPPLY")
                .unwrap_or_else(|| DEFAULT_TOKEN_MAX_SUPPLY.to_string()),
            transfer_fee: lookup("TOKEN_TRANSFER_FEE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TRANSFER_FEE),
            metadata_uri: lookup("TOKEN_METADATA_URI"),
        };

        let bridge_amount = match lookup("BRIDGE_AMOUNT") {
            Some(v) => v.parse().wrap_err("BRIDGE_AMOUNT must be a valid u128")?,
            None => DEFAULT_BRIDGE_AMOUNT,
        };

        let artifacts_dir = PathBuf::from(
            lookup("ARTIFACTS_DIR").unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string()),
        );

        let config = ControllerConfig {
            xrpl,
            evm,
            token,
            bridge_amount,
            artifacts_dir,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. Runs before any network I/O.
    fn validate(&self) -> Result<()> {
        if self.xrpl.rpc_url.is_empty() {
            return Err(eyre!("xrpl.rpc_url cannot be empty"));
        }

        if self.xrpl.account_address.is_empty() {
            return Err(eyre!("xrpl.account_address cannot be empty"));
        }

        if self.xrpl.account_secret.is_empty() {
            return Err(eyre!("xrpl.account_secret cannot be empty"));
        }

        if self.evm.rpc_url.is_empty() {
            return Err(eyre!("evm.rpc_url cannot be empty"));
        }

        // A key that does not decode as 32 bytes of hex must fail here,
        // before any client exists.
        validate_private_key(&self.evm.private_key)
            .map_err(|e| eyre!("evm.private_key: {}", e))?;

        if self.bridge_amount == 0 {
            return Err(eyre!("bridge_amount must be positive"));
        }

        if self.token.name.is_empty() || self.token.symbol.is_empty() {
            return Err(eyre!("token name and symbol cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn full_env() -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(
            "XRPL_RPC_URL".to_string(),
            "https://s.altnet.rippletest.net:51234".to_string(),
        );
        env.insert(
            "XRPL_ACCOUNT_ADDRESS".to_string(),
            "rEXAMPLEissuer111111111111111".to_string(),
        );
        env.insert("XRPL_ACCOUNT_SECRET".to_string(), "sSeedValue".to_string());
        env.insert(
            "EVM_RPC_URL".to_string(),
            "http://localhost:8545".to_string(),
        );
        env.insert("EVM_CHAIN_ID".to_string(), "31337".to_string());
        env.insert("EVM_PRIVATE_KEY".to_string(), TEST_KEY.to_string());
        env
    }

    fn load(env: &HashMap<String, String>) -> Result<ControllerConfig> {
        ControllerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_full_config_with_defaults() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.token.name, "Hackathon Demo Token");
        assert_eq!(config.token.symbol, "HDT");
        assert_eq!(config.token.decimals, 6);
        assert_eq!(config.token.max_supply, "1000000000000");
        assert_eq!(config.token.transfer_fee, 500);
        assert_eq!(config.bridge_amount, 123_000_000);
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_missing_endpoint_is_fatal() {
        let mut env = full_env();
        env.remove("XRPL_RPC_URL");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("XRPL_RPC_URL"));
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let mut env = full_env();
        env.remove("EVM_PRIVATE_KEY");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("EVM_PRIVATE_KEY"));
    }

    #[test]
    fn test_non_hex_private_key_is_fatal() {
        let mut env = full_env();
        env.insert("EVM_PRIVATE_KEY".to_string(), "not-hex".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("hexadecimal"));
    }

    #[test]
    fn test_zero_bridge_amount_is_fatal() {
        let mut env = full_env();
        env.insert("BRIDGE_AMOUNT".to_string(), "0".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_overrides_apply() {
        let mut env = full_env();
        env.insert("TOKEN_NAME".to_string(), "Other Token".to_string());
        env.insert("TOKEN_SYMBOL".to_string(), "OTK".to_string());
        env.insert("TOKEN_DECIMALS".to_string(), "8".to_string());
        env.insert("BRIDGE_AMOUNT".to_string(), "42".to_string());
        env.insert("ARTIFACTS_DIR".to_string(), "/tmp/artifacts".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.token.name, "Other Token");
        assert_eq!(config.token.symbol, "OTK");
        assert_eq!(config.token.decimals, 8);
        assert_eq!(config.bridge_amount, 42);
        assert_eq!(config.artifacts_dir, PathBuf::from("/tmp/artifacts"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&full_env()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sSeedValue"));
        assert!(!debug.contains("ac0974bec39a17"));
        assert!(debug.contains("<redacted>"));
    }
}
