//! EVM RPC client wrappers
//!
//! A signing client for write operations (deployment, minting) and a
//! read-only client for balance and connectivity queries, both over HTTP.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::{eyre, Result};
use tracing::info;

/// HTTP provider with a wallet filler attached for transaction signing.
pub type WalletProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::Identity,
        alloy::providers::fillers::WalletFiller<EthereumWallet>,
    >,
    RootProvider<Http<Client>>,
    Http<Client>,
    Ethereum,
>;

/// EVM client with signing capabilities.
///
/// Transactions sent through this provider carry no automatic gas or nonce
/// fills: callers set those explicitly, which keeps deployment parameters
/// deterministic.
pub struct EvmSigner {
    provider: WalletProvider,
    /// Chain ID used for every signed transaction.
    pub chain_id: u64,
    /// Signer address.
    pub address: Address,
}

impl EvmSigner {
    pub fn new(rpc_url: &str, chain_id: u64, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| eyre!("Invalid private key: {}", e))?;

        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).on_http(
            rpc_url
                .parse()
                .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
        );

        info!(
            rpc_url = %rpc_url,
            chain_id = chain_id,
            address = %address,
            "EVM signer initialized"
        );

        Ok(Self {
            provider,
            chain_id,
            address,
        })
    }

    pub fn provider(&self) -> &WalletProvider {
        &self.provider
    }

    /// Current transaction count for this signer.
    pub async fn get_nonce(&self) -> Result<u64> {
        let nonce = self.provider.get_transaction_count(self.address).await?;
        Ok(nonce)
    }

    /// Current network gas price.
    pub async fn get_gas_price(&self) -> Result<u128> {
        let price = self.provider.get_gas_price().await?;
        Ok(price)
    }

    /// Chain ID as reported by the RPC (may differ from the configured one).
    pub async fn get_chain_id(&self) -> Result<u64> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(chain_id)
    }

    /// Native-token balance of this signer.
    pub async fn get_balance(&self) -> Result<U256> {
        let balance = self.provider.get_balance(self.address).await?;
        Ok(balance)
    }

    /// Current block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }
}

/// Read-only EVM client.
pub struct EvmReader {
    pub provider: RootProvider<Http<Client>>,
}

impl EvmReader {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
        );
        Ok(Self { provider })
    }

    pub async fn get_chain_id(&self) -> Result<u64> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(chain_id)
    }

    pub async fn get_block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }
}
