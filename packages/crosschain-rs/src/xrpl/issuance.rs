//! MPToken issuance adapter
//!
//! Builds and submits an `MPTokenIssuanceCreate` transaction, waits for
//! ledger validation, and classifies the outcome. The validated metadata's
//! `mpt_issuance_id` is the opaque handle every later step consumes; a
//! validated success without it is a malformed response, not a rejection.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use eyre::Result;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::StepError;
use crate::pipeline::IssuanceAdapter;
use crate::types::{IssuanceRecord, TokenParams};
use crate::xrpl::client::XrplClient;

/// Canonical XRPL success result code.
pub const TES_SUCCESS: &str = "tesSUCCESS";

/// tfMPTCanTransfer: holders may transfer the token between each other.
pub const TF_MPT_CAN_TRANSFER: u32 = 32;

/// How long to wait for the issuance transaction to reach a validated ledger.
const VALIDATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Encode the on-chain metadata record as uppercase hex of the canonical
/// `{"name","symbol","uri"}` JSON document.
pub fn encode_metadata(name: &str, symbol: &str, uri: Option<&str>) -> String {
    let payload = json!({
        "name": name,
        "symbol": symbol,
        "uri": uri.unwrap_or(""),
    });
    hex::encode_upper(payload.to_string().as_bytes())
}

/// Build the `MPTokenIssuanceCreate` tx_json for the given issuer account.
pub fn issuance_tx_json(account: &str, params: &TokenParams) -> Value {
    json!({
        "TransactionType": "MPTokenIssuanceCreate",
        "Account": account,
        "MaximumAmount": params.max_supply,
        "AssetScale": params.decimals,
        "TransferFee": params.transfer_fee,
        "MPTokenMetadata": encode_metadata(
            &params.name,
            &params.symbol,
            params.metadata_uri.as_deref(),
        ),
        "Flags": TF_MPT_CAN_TRANSFER,
    })
}

/// Classify a validated `tx` result into an issuance record.
///
/// Errors only for malformed responses; rejections come back as a record
/// with `Failed` status.
pub fn classify_validated(params: &TokenParams, validated: &Value) -> Result<IssuanceRecord> {
    let meta = validated
        .get("meta")
        .ok_or_else(|| StepError::MalformedResponse("validated transaction has no meta".into()))?;

    let result_code = meta
        .get("TransactionResult")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            StepError::MalformedResponse("transaction meta has no TransactionResult".into())
        })?;

    if result_code != TES_SUCCESS {
        return Ok(IssuanceRecord::rejected(params, result_code));
    }

    match meta.get("mpt_issuance_id").and_then(Value::as_str) {
        Some(id) => Ok(IssuanceRecord::success(params, id, result_code)),
        None => Err(StepError::MalformedResponse(
            "mpt_issuance_id missing from validated transaction metadata".into(),
        )
        .into()),
    }
}

/// Issuance adapter backed by an XRPL node.
pub struct XrplIssuer {
    client: XrplClient,
    account: String,
    secret: String,
}

/// Custom Debug that redacts the account secret.
impl fmt::Debug for XrplIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XrplIssuer")
            .field("rpc_url", &self.client.rpc_url())
            .field("account", &self.account)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl XrplIssuer {
    pub fn new(client: XrplClient, account: &str, secret: &str) -> Self {
        Self {
            client,
            account: account.to_string(),
            secret: secret.to_string(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    async fn submit_and_wait(&self, params: &TokenParams) -> Result<IssuanceRecord> {
        let tx_json = issuance_tx_json(&self.account, params);

        info!(
            name = %params.name,
            symbol = %params.symbol,
            decimals = params.decimals,
            "Submitting MPTokenIssuanceCreate"
        );

        let outcome = self.client.sign_and_submit(&self.secret, tx_json).await?;

        // Anything other than provisional success or a queued transaction
        // will never validate, so report the rejection right away.
        if outcome.engine_result != TES_SUCCESS && outcome.engine_result != "terQUEUED" {
            warn!(code = %outcome.engine_result, "Issuance rejected at submission");
            return Ok(IssuanceRecord::rejected(params, &outcome.engine_result));
        }

        let validated = self
            .client
            .wait_for_validation(&outcome.tx_hash, VALIDATION_TIMEOUT)
            .await?;

        let record = classify_validated(params, &validated)?;
        match record.issuance_id.as_deref() {
            Some(id) => info!(issuance_id = %id, "MPToken issuance validated"),
            None => warn!(
                code = record.result_code.as_deref().unwrap_or("unknown"),
                "MPToken issuance failed on ledger"
            ),
        }
        Ok(record)
    }
}

#[async_trait]
impl IssuanceAdapter for XrplIssuer {
    /// Never errors past this boundary: transport and malformed-response
    /// failures come back as a record with status Exception, message intact.
    async fn create_issuance(&self, params: &TokenParams) -> IssuanceRecord {
        match self.submit_and_wait(params).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Issuance step raised an exception");
                IssuanceRecord::exception(params, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StepStatus;

    fn params() -> TokenParams {
        TokenParams {
            name: "Hackathon Demo Token".to_string(),
            symbol: "HDT".to_string(),
            decimals: 6,
            max_supply: "1000000000000".to_string(),
            transfer_fee: 500,
            metadata_uri: None,
        }
    }

    #[test]
    fn test_encode_metadata_round_trips() {
        let encoded = encode_metadata("Hackathon Demo Token", "HDT", None);
        assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));

        let bytes = hex::decode(&encoded).unwrap();
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["name"], "Hackathon Demo Token");
        assert_eq!(decoded["symbol"], "HDT");
        assert_eq!(decoded["uri"], "");
    }

    #[test]
    fn test_encode_metadata_includes_uri() {
        let encoded = encode_metadata("T", "T", Some("https://example.com/t.json"));
        let bytes = hex::decode(&encoded).unwrap();
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["uri"], "https://example.com/t.json");
    }

    #[test]
    fn test_issuance_tx_json_fields() {
        let tx = issuance_tx_json("rIssuer123", &params());
        assert_eq!(tx["TransactionType"], "MPTokenIssuanceCreate");
        assert_eq!(tx["Account"], "rIssuer123");
        assert_eq!(tx["MaximumAmount"], "1000000000000");
        assert_eq!(tx["AssetScale"], 6);
        assert_eq!(tx["TransferFee"], 500);
        assert_eq!(tx["Flags"], TF_MPT_CAN_TRANSFER);
        assert!(!tx["MPTokenMetadata"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_classify_validated_success() {
        let validated = json!({
            "validated": true,
            "meta": {
                "TransactionResult": "tesSUCCESS",
                "mpt_issuance_id": "00120D73C89AB1"
            }
        });
        let record = classify_validated(&params(), &validated).unwrap();
        assert_eq!(record.status, StepStatus::Success);
        assert_eq!(record.issuance_id.as_deref(), Some("00120D73C89AB1"));
        assert_eq!(record.result_code.as_deref(), Some("tesSUCCESS"));
    }

    #[test]
    fn test_classify_validated_rejection() {
        let validated = json!({
            "validated": true,
            "meta": { "TransactionResult": "tecDUPLICATE" }
        });
        let record = classify_validated(&params(), &validated).unwrap();
        assert_eq!(record.status, StepStatus::Failed);
        assert!(record.issuance_id.is_none());
        assert_eq!(record.result_code.as_deref(), Some("tecDUPLICATE"));
    }

    #[test]
    fn test_classify_success_without_id_is_malformed() {
        let validated = json!({
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS" }
        });
        let err = classify_validated(&params(), &validated).unwrap_err();
        assert!(err.to_string().contains("malformed response"));
        assert!(err.to_string().contains("mpt_issuance_id"));
    }

    #[test]
    fn test_classify_missing_meta_is_malformed() {
        let validated = json!({ "validated": true });
        let err = classify_validated(&params(), &validated).unwrap_err();
        assert!(err.to_string().contains("malformed response"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let issuer = XrplIssuer::new(
            XrplClient::new("https://s.altnet.rippletest.net:51234").unwrap(),
            "rIssuer123",
            "sSecretSeed",
        );
        let debug = format!("{:?}", issuer);
        assert!(!debug.contains("sSecretSeed"));
        assert!(debug.contains("<redacted>"));
    }
}
