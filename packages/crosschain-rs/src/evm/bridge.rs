//! Bridge simulation
//!
//! `MockRelayExecutor` stands in for an external interoperability network
//! (an Axelar-style GMP relay): instead of verifying a relayed message from
//! the source ledger, it calls the mirror contract's privileged `mint`
//! directly. A real integration would replace this executor with one that
//! verifies the relay's signed message before minting; nothing else in the
//! pipeline needs to change.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use eyre::{eyre, Result, WrapErr};
use tracing::{info, warn};

use crate::evm::client::EvmSigner;
use crate::evm::contracts::BridgedMPToken;
use crate::pipeline::BridgeExecutor;
use crate::types::BridgeMintResult;

/// Fixed gas limit for the simulated bridge mint.
pub const BRIDGE_MINT_GAS_LIMIT: u64 = 200_000;

/// Simulated bridge executor: direct privileged mint on the mirror contract.
pub struct MockRelayExecutor {
    signer: Arc<EvmSigner>,
}

impl MockRelayExecutor {
    pub fn new(signer: Arc<EvmSigner>) -> Self {
        Self { signer }
    }

    async fn mint_inner(
        &self,
        contract_address: Address,
        destination: Address,
        amount: u128,
    ) -> Result<String> {
        let contract = BridgedMPToken::new(contract_address, self.signer.provider().clone());

        let gas_price = self.signer.get_gas_price().await?;
        let nonce = self.signer.get_nonce().await?;

        info!(
            contract = %contract_address,
            destination = %destination,
            amount = amount,
            "Simulating inbound bridge transfer via direct mint"
        );

        let receipt = contract
            .mint(destination, U256::from(amount))
            .chain_id(self.signer.chain_id)
            .nonce(nonce)
            .gas(BRIDGE_MINT_GAS_LIMIT)
            .gas_price(gas_price)
            .send()
            .await
            .wrap_err("Failed to broadcast mint transaction")?
            .get_receipt()
            .await
            .wrap_err("Failed to get mint receipt")?;

        let tx_hash = format!("{}", receipt.transaction_hash);

        if !receipt.status() {
            return Err(eyre!("mint transaction {} reverted", tx_hash));
        }

        info!(tx_hash = %tx_hash, "Simulated bridge mint confirmed");

        Ok(tx_hash)
    }
}

#[async_trait]
impl BridgeExecutor for MockRelayExecutor {
    /// Blocks until the mint transaction is finalized. Failures come back
    /// as a result with status Exception, message preserved verbatim.
    async fn simulate_bridge_mint(
        &self,
        contract_address: Address,
        destination: Address,
        amount: u128,
    ) -> BridgeMintResult {
        match self
            .mint_inner(contract_address, destination, amount)
            .await
        {
            Ok(tx_hash) => BridgeMintResult::success(tx_hash),
            Err(e) => {
                warn!(error = %e, "Bridge mint simulation raised an exception");
                BridgeMintResult::exception(e.to_string())
            }
        }
    }
}
