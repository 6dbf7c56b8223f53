//! XRPL JSON-RPC client
//!
//! Thin HTTP wrapper over a rippled-style JSON-RPC endpoint. Transaction
//! signing is delegated to the node's sign-and-submit mode, so this client
//! never handles key material beyond forwarding the account secret with the
//! submit request. Finality is reached by polling `tx` until the transaction
//! appears in a validated ledger.

use std::time::{Duration, Instant};

use eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Poll interval while waiting for ledger validation.
const VALIDATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of a `submit` call: the provisional engine result and the hash
/// to poll for validation.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub engine_result: String,
    pub tx_hash: String,
}

/// XRPL JSON-RPC client over HTTP.
pub struct XrplClient {
    rpc_url: String,
    client: Client,
}

impl XrplClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        // Fail on malformed URLs here, not on first use.
        let _: url::Url = rpc_url
            .parse()
            .map_err(|e| eyre!("Invalid XRPL RPC URL '{}': {}", rpc_url, e))?;

        info!(rpc_url = %rpc_url, "XRPL client initialized");

        Ok(Self {
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Issue a JSON-RPC request and return the raw `result` object without
    /// inspecting its status field.
    async fn request_raw(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({ "method": method, "params": [params] });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .wrap_err_with(|| format!("XRPL request '{}' failed to send", method))?;

        if !response.status().is_success() {
            return Err(eyre!(
                "XRPL request '{}' failed: HTTP {} - {}",
                method,
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        let data: Value = response
            .json()
            .await
            .wrap_err_with(|| format!("XRPL request '{}' returned invalid JSON", method))?;

        data.get("result")
            .cloned()
            .ok_or_else(|| eyre!("XRPL request '{}' response missing 'result' field", method))
    }

    /// Issue a JSON-RPC request, erroring on a ledger-reported failure.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let result = self.request_raw(method, params).await?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let message = result
                .get("error_message")
                .or_else(|| result.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(eyre!("XRPL request '{}' failed: {}", method, message));
        }

        Ok(result)
    }

    /// Connectivity probe: query `server_info` and return the result object.
    pub async fn server_info(&self) -> Result<Value> {
        let result = self.request("server_info", json!({})).await?;
        result
            .get("info")
            .cloned()
            .ok_or_else(|| eyre!("server_info response missing 'info' field"))
    }

    /// Sign and submit a transaction via the node (sign-and-submit mode).
    ///
    /// Returns the provisional engine result and the transaction hash. The
    /// engine result is not final; callers must wait for validation before
    /// trusting it.
    pub async fn sign_and_submit(&self, secret: &str, tx_json: Value) -> Result<SubmitOutcome> {
        let params = json!({
            "secret": secret,
            "tx_json": tx_json,
            "fail_hard": false,
        });

        let result = self.request("submit", params).await?;

        let engine_result = result
            .get("engine_result")
            .and_then(Value::as_str)
            .ok_or_else(|| eyre!("submit response missing 'engine_result' field"))?
            .to_string();

        let tx_hash = result
            .get("tx_json")
            .and_then(|t| t.get("hash"))
            .and_then(Value::as_str)
            .ok_or_else(|| eyre!("submit response missing transaction hash"))?
            .to_string();

        debug!(engine_result = %engine_result, tx_hash = %tx_hash, "Transaction submitted");

        Ok(SubmitOutcome {
            engine_result,
            tx_hash,
        })
    }

    /// Look up a transaction by hash. Returns `None` while the ledger does
    /// not know the transaction yet.
    pub async fn transaction(&self, tx_hash: &str) -> Result<Option<Value>> {
        let params = json!({ "transaction": tx_hash, "binary": false });
        let result = self.request_raw("tx", params).await?;

        if result.get("error").and_then(Value::as_str) == Some("txnNotFound") {
            return Ok(None);
        }

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let message = result
                .get("error_message")
                .or_else(|| result.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(eyre!("XRPL tx lookup for {} failed: {}", tx_hash, message));
        }

        Ok(Some(result))
    }

    /// Block until the transaction appears in a validated ledger, returning
    /// the full `tx` result (including `meta`).
    pub async fn wait_for_validation(&self, tx_hash: &str, timeout: Duration) -> Result<Value> {
        let start = Instant::now();

        while start.elapsed() < timeout {
            if let Some(result) = self.transaction(tx_hash).await? {
                if result
                    .get("validated")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                {
                    let ledger_index = result.get("ledger_index").and_then(Value::as_u64);
                    debug!(tx_hash = %tx_hash, ledger_index = ?ledger_index, "Transaction validated");
                    return Ok(result);
                }
            }
            tokio::time::sleep(VALIDATION_POLL_INTERVAL).await;
        }

        Err(eyre!(
            "transaction {} not validated after {:?}",
            tx_hash,
            timeout
        ))
    }
}
