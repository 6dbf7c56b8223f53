//! EVM sidechain support: signing client, contract bindings, artifact
//! loading, mirror deployment, balance reads, and the mock bridge executor.

pub mod artifact;
pub mod bridge;
pub mod client;
pub mod contracts;
pub mod deploy;
pub mod tokens;

pub use artifact::{ContractArtifact, MIRROR_CONTRACT_NAME};
pub use bridge::{MockRelayExecutor, BRIDGE_MINT_GAS_LIMIT};
pub use client::{EvmReader, EvmSigner};
pub use deploy::{EvmDeployer, DEPLOY_GAS_LIMIT};
pub use tokens::MirrorBalanceReader;
