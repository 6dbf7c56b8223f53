//! Mirror contract deployment adapter
//!
//! Builds the deployment transaction with deterministic parameters: a fixed
//! gas limit, the network-queried gas price and nonce, and constructor args
//! `(name, symbol, owner)` appended to the artifact bytecode. Blocks until
//! the deployment transaction is mined.

use std::path::PathBuf;
use std::sync::Arc;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolValue,
};
use async_trait::async_trait;
use eyre::{eyre, Result, WrapErr};
use tracing::{info, warn};

use crate::evm::artifact::{ContractArtifact, MIRROR_CONTRACT_NAME};
use crate::evm::client::EvmSigner;
use crate::pipeline::MirrorDeployer;
use crate::types::DeploymentResult;

/// Fixed gas limit for the deployment transaction.
pub const DEPLOY_GAS_LIMIT: u64 = 2_000_000;

/// Deploys the mirrored token contract from a compiled artifact.
pub struct EvmDeployer {
    signer: Arc<EvmSigner>,
    artifacts_root: PathBuf,
}

impl EvmDeployer {
    pub fn new(signer: Arc<EvmSigner>, artifacts_root: PathBuf) -> Self {
        Self {
            signer,
            artifacts_root,
        }
    }

    /// ABI-encoded constructor arguments for the mirror contract:
    /// `(string name, string symbol, address owner)`.
    pub fn encode_constructor_args(name: &str, symbol: &str, owner: Address) -> Vec<u8> {
        (name.to_string(), symbol.to_string(), owner).abi_encode_params()
    }

    async fn deploy_inner(&self, name: &str, symbol: &str) -> Result<(Address, String)> {
        let artifact = ContractArtifact::load(&self.artifacts_root, MIRROR_CONTRACT_NAME)?;

        let mut code = artifact.bytecode_bytes()?;
        code.extend_from_slice(&Self::encode_constructor_args(
            name,
            symbol,
            self.signer.address,
        ));

        let gas_price = self.signer.get_gas_price().await?;
        let nonce = self.signer.get_nonce().await?;

        info!(
            name = %name,
            symbol = %symbol,
            gas_price = gas_price,
            nonce = nonce,
            "Deploying mirror contract"
        );

        let tx = TransactionRequest::default()
            .with_deploy_code(Bytes::from(code))
            .with_chain_id(self.signer.chain_id)
            .with_nonce(nonce)
            .with_gas_limit(DEPLOY_GAS_LIMIT)
            .with_gas_price(gas_price);

        let receipt = self
            .signer
            .provider()
            .send_transaction(tx)
            .await
            .wrap_err("Failed to broadcast deployment transaction")?
            .get_receipt()
            .await
            .wrap_err("Failed to get deployment receipt")?;

        let tx_hash = format!("{}", receipt.transaction_hash);

        if !receipt.status() {
            return Err(eyre!("deployment transaction {} reverted", tx_hash));
        }

        let contract_address = receipt
            .contract_address
            .ok_or_else(|| eyre!("deployment receipt missing contract address"))?;

        info!(
            contract_address = %contract_address,
            tx_hash = %tx_hash,
            "Mirror contract deployed"
        );

        Ok((contract_address, tx_hash))
    }
}

#[async_trait]
impl MirrorDeployer for EvmDeployer {
    /// Every failure path (artifact loading, signing, broadcast, receipt) is
    /// caught here and folded into a result with status Exception, message
    /// preserved verbatim.
    async fn deploy_mirror_contract(&self, name: &str, symbol: &str) -> DeploymentResult {
        match self.deploy_inner(name, symbol).await {
            Ok((address, tx_hash)) => DeploymentResult::success(address, tx_hash),
            Err(e) => {
                warn!(error = %e, "Mirror deployment raised an exception");
                DeploymentResult::exception(e.to_string())
            }
        }
    }
}
