//! Mirror token balance reads
//!
//! Read-only queries against the mirrored contract's standard `balanceOf`
//! entry point.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    transports::Transport,
};
use async_trait::async_trait;
use eyre::{eyre, Result};
use tracing::warn;

use crate::evm::client::EvmReader;
use crate::evm::contracts::BridgedMPToken;
use crate::pipeline::BalanceReader;

/// Get the mirror token balance of an address.
pub async fn get_token_balance<T, P>(
    provider: P,
    token_address: Address,
    account: Address,
) -> Result<U256>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let contract = BridgedMPToken::new(token_address, provider);
    let balance = contract
        .balanceOf(account)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get balance: {}", e))?;
    Ok(balance._0)
}

/// Balance reader over a read-only provider.
///
/// Reports balances as `i128` with `-1` as the failure sentinel, the
/// contract the pipeline's verification steps consume.
pub struct MirrorBalanceReader {
    reader: EvmReader,
}

impl MirrorBalanceReader {
    pub fn new(reader: EvmReader) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl BalanceReader for MirrorBalanceReader {
    async fn read_balance(&self, contract_address: Address, account: Address) -> i128 {
        match get_token_balance(self.reader.provider.clone(), contract_address, account).await {
            Ok(balance) => i128::try_from(balance).unwrap_or(i128::MAX),
            Err(e) => {
                warn!(
                    contract = %contract_address,
                    account = %account,
                    error = %e,
                    "Balance query failed"
                );
                -1
            }
        }
    }
}
