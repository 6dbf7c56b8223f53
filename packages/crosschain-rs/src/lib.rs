//! Crosschain-RS: shared library for the MPToken mirror demo
//!
//! This crate provides everything the controller binary needs to issue a
//! multi-purpose token on the XRP Ledger, deploy its ERC20 twin on an EVM
//! sidechain, and simulate a bridge transfer between them:
//!
//! - **Types** - Step result records, the pipeline state machine, token params
//! - **XRPL Module** - JSON-RPC client, MPToken issuance adapter
//! - **EVM Module** - Signing client, contract bindings, artifact loading,
//!   mirror deployment, balance reads, mock bridge executor
//! - **Pipeline** - The four-step issue-and-mirror coordinator
//!
//! The bridge step is explicitly a simulation (a direct privileged mint on
//! the mirror contract); see [`evm::bridge`].
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! crosschain-rs = { path = "../crosschain-rs" }
//! ```

pub mod error;
pub mod evm;
pub mod pipeline;
pub mod types;
pub mod xrpl;

// Re-export commonly used items at the crate root
pub use error::{validate_private_key, StepError};
pub use pipeline::{BalanceReader, BridgeExecutor, IssuanceAdapter, MirrorDeployer, Pipeline};
pub use types::{
    BridgeMintResult, DeploymentResult, IssuanceRecord, PipelineReport, PipelineState, StepStatus,
    TokenParams,
};
