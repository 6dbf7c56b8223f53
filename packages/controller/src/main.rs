mod config;

use std::sync::Arc;

use eyre::{eyre, Result};
use tracing::{error, info};

use config::ControllerConfig;
use crosschain_rs::evm::{EvmDeployer, EvmReader, EvmSigner, MirrorBalanceReader, MockRelayExecutor};
use crosschain_rs::xrpl::{XrplClient, XrplIssuer};
use crosschain_rs::{Pipeline, PipelineState};

fn main() -> Result<()> {
    // Install color-eyre for better error reporting
    color_eyre::install()?;

    // Run the async main
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    init_logging();

    info!("Starting MPToken mirror controller");

    let check_only = std::env::args().any(|arg| arg == "--check");

    let config = ControllerConfig::load()?;
    info!(
        xrpl_rpc = %config.xrpl.rpc_url,
        evm_rpc = %config.evm.rpc_url,
        evm_chain_id = config.evm.chain_id,
        token = %config.token.symbol,
        bridge_amount = config.bridge_amount,
        "Configuration loaded"
    );

    let xrpl = XrplClient::new(&config.xrpl.rpc_url)?;
    let signer = Arc::new(EvmSigner::new(
        &config.evm.rpc_url,
        config.evm.chain_id,
        &config.evm.private_key,
    )?);
    let reader = EvmReader::new(&config.evm.rpc_url)?;

    if check_only {
        return preflight(&config, &xrpl, &signer, &reader).await;
    }

    // The deployer account doubles as the bridged-value recipient in this demo.
    let destination = signer.address;

    let pipeline = Pipeline::new(
        XrplIssuer::new(xrpl, &config.xrpl.account_address, &config.xrpl.account_secret),
        EvmDeployer::new(signer.clone(), config.artifacts_dir.clone()),
        MirrorBalanceReader::new(reader),
        MockRelayExecutor::new(signer.clone()),
    );

    let report = pipeline
        .run(&config.token, destination, config.bridge_amount)
        .await;

    match &report.state {
        PipelineState::Done => {
            info!(
                issuance_id = report
                    .issuance
                    .as_ref()
                    .and_then(|i| i.issuance_id.as_deref())
                    .unwrap_or("unknown"),
                contract_address = %report
                    .deployment
                    .as_ref()
                    .and_then(|d| d.contract_address)
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                final_balance = report.post_bridge_balance.unwrap_or(-1),
                "End-to-end flow complete"
            );
            Ok(())
        }
        PipelineState::Aborted(reason) => {
            error!(reason = %reason, "Pipeline aborted");
            Err(eyre!("pipeline aborted: {}", reason))
        }
        other => Err(eyre!("pipeline ended in non-terminal state: {}", other)),
    }
}

/// Connectivity preflight: probe both chains without submitting anything.
async fn preflight(
    config: &ControllerConfig,
    xrpl: &XrplClient,
    signer: &EvmSigner,
    reader: &EvmReader,
) -> Result<()> {
    info!("Running connectivity preflight");

    let server = xrpl.server_info().await?;
    info!(
        build_version = server
            .get("build_version")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown"),
        "XRPL node reachable"
    );

    let chain_id = reader.get_chain_id().await?;
    if chain_id != config.evm.chain_id {
        return Err(eyre!(
            "EVM chain id mismatch: configured {}, node reports {}",
            config.evm.chain_id,
            chain_id
        ));
    }
    let block = reader.get_block_number().await?;
    let balance = signer.get_balance().await?;
    info!(
        chain_id = chain_id,
        latest_block = block,
        deployer = %signer.address,
        deployer_balance = %balance,
        "EVM sidechain reachable"
    );

    info!("Preflight passed");
    Ok(())
}

/// Initialize tracing/logging with structured output
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crosschain_rs=debug,mpt_controller=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
