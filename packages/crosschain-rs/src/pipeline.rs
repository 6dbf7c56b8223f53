//! Issue-and-mirror workflow coordinator
//!
//! Drives the four-step pipeline: issue the MPToken on the source ledger,
//! deploy the mirror contract on the EVM sidechain, verify the pre-bridge
//! balance is zero, simulate the bridge mint, and verify the post-bridge
//! balance equals the bridged amount.
//!
//! Strictly sequential with fail-fast short-circuiting: any non-success
//! step result transitions to `Aborted` and skips everything downstream.
//! No compensation is attempted for prior successful steps; issued tokens
//! and deployed contracts remain on-chain.

use alloy::primitives::Address;
use async_trait::async_trait;
use tracing::{error, info};

use crate::types::{
    BridgeMintResult, DeploymentResult, IssuanceRecord, PipelineReport, PipelineState, TokenParams,
};

/// Creates the token issuance on the source ledger.
#[async_trait]
pub trait IssuanceAdapter {
    async fn create_issuance(&self, params: &TokenParams) -> IssuanceRecord;
}

/// Deploys the mirror contract on the destination chain.
#[async_trait]
pub trait MirrorDeployer {
    async fn deploy_mirror_contract(&self, name: &str, symbol: &str) -> DeploymentResult;
}

/// Reads mirror token balances. Returns `-1` on failure.
#[async_trait]
pub trait BalanceReader {
    async fn read_balance(&self, contract_address: Address, account: Address) -> i128;
}

/// Moves value onto the destination chain.
///
/// The only implementation today is a simulation that mints directly; a
/// real bridge integration slots in behind this trait.
#[async_trait]
pub trait BridgeExecutor {
    async fn simulate_bridge_mint(
        &self,
        contract_address: Address,
        destination: Address,
        amount: u128,
    ) -> BridgeMintResult;
}

/// The four-step workflow coordinator.
pub struct Pipeline<I, D, B, X> {
    issuer: I,
    deployer: D,
    balances: B,
    bridge: X,
}

impl<I, D, B, X> Pipeline<I, D, B, X>
where
    I: IssuanceAdapter,
    D: MirrorDeployer,
    B: BalanceReader,
    X: BridgeExecutor,
{
    pub fn new(issuer: I, deployer: D, balances: B, bridge: X) -> Self {
        Self {
            issuer,
            deployer,
            balances,
            bridge,
        }
    }

    /// Run the pipeline to a terminal state.
    ///
    /// `bridge_amount` is in the token's smallest unit and must be positive;
    /// `destination` receives the simulated bridged value.
    pub async fn run(
        &self,
        token: &TokenParams,
        destination: Address,
        bridge_amount: u128,
    ) -> PipelineReport {
        let mut report = PipelineReport::new();

        if bridge_amount == 0 {
            return Self::abort(report, "bridge amount must be positive".to_string());
        }

        // Step 1: issuance on the source ledger.
        info!(name = %token.name, symbol = %token.symbol, "Step 1: creating MPToken issuance");
        let issuance = self.issuer.create_issuance(token).await;
        let issuance_ok = issuance.status.is_success();
        let has_id = issuance.issuance_id.is_some();
        let diag = issuance
            .error
            .clone()
            .or_else(|| issuance.result_code.clone())
            .unwrap_or_else(|| "unknown".to_string());
        report.issuance = Some(issuance);

        if !issuance_ok {
            return Self::abort(report, format!("issuance failed: {}", diag));
        }
        if !has_id {
            // Success without a handle is a malformed response, not a
            // ledger rejection.
            return Self::abort(
                report,
                "issuance failed: malformed response, issuance id missing".to_string(),
            );
        }
        report.state = PipelineState::Issued;

        // Step 2: mirror contract deployment on the destination chain.
        info!("Step 2: deploying mirror contract");
        let deployment = self
            .deployer
            .deploy_mirror_contract(&token.name, &token.symbol)
            .await;
        let deployment_ok = deployment.status.is_success();
        let contract_address = deployment.contract_address;
        let diag = deployment
            .error
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        report.deployment = Some(deployment);

        if !deployment_ok {
            return Self::abort(report, format!("deployment failed: {}", diag));
        }
        let contract_address = match contract_address {
            Some(address) => address,
            None => {
                return Self::abort(
                    report,
                    "deployment failed: malformed result, contract address missing".to_string(),
                )
            }
        };
        report.state = PipelineState::Mirrored;

        // Step 3: pre-bridge balance must read zero on the fresh contract.
        info!(contract = %contract_address, "Step 3: verifying pre-bridge balance");
        let pre_balance = self
            .balances
            .read_balance(contract_address, destination)
            .await;
        report.pre_bridge_balance = Some(pre_balance);

        if pre_balance < 0 {
            return Self::abort(report, "pre-bridge balance read failed".to_string());
        }
        if pre_balance != 0 {
            return Self::abort(
                report,
                format!("unexpected pre-bridge balance: {}", pre_balance),
            );
        }
        report.state = PipelineState::PreVerified;

        // Step 4a: simulated bridge mint.
        info!(amount = bridge_amount, "Step 4: simulating bridge mint");
        let mint = self
            .bridge
            .simulate_bridge_mint(contract_address, destination, bridge_amount)
            .await;
        let mint_ok = mint.status.is_success();
        let diag = mint.error.clone().unwrap_or_else(|| "unknown".to_string());
        report.bridge = Some(mint);

        if !mint_ok {
            return Self::abort(report, format!("bridge mint failed: {}", diag));
        }
        report.state = PipelineState::Bridged;

        // Step 4b: post-bridge balance must equal the bridged amount.
        info!("Step 5: verifying post-bridge balance");
        let post_balance = self
            .balances
            .read_balance(contract_address, destination)
            .await;
        report.post_bridge_balance = Some(post_balance);

        if post_balance < 0 {
            return Self::abort(report, "post-bridge balance read failed".to_string());
        }
        if post_balance as u128 != bridge_amount {
            return Self::abort(
                report,
                format!(
                    "final balance mismatch: expected {}, found {}",
                    bridge_amount, post_balance
                ),
            );
        }
        report.state = PipelineState::PostVerified;

        info!(final_balance = post_balance, "Pipeline complete");
        report.state = PipelineState::Done;
        report
    }

    fn abort(mut report: PipelineReport, reason: String) -> PipelineReport {
        error!(reason = %reason, "Pipeline aborted");
        report.state = PipelineState::Aborted(reason);
        report
    }
}
