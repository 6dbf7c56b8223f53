//! Common types for the issue-and-mirror workflow
//!
//! Step results are transient, in-memory records: adapters fill them in and
//! the pipeline passes them forward. Nothing here is persisted by this crate.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome classification for a single pipeline step.
///
/// `Failed` means the network processed the call but the transaction's result
/// code indicates rejection. `Exception` means the adapter hit a transport or
/// client error (or a malformed response) and never got a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Success,
    Failed,
    Exception,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Success => "success",
            StepStatus::Failed => "failed",
            StepStatus::Exception => "exception",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Success)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata for the token being issued and mirrored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    /// Asset scale: number of decimal places in the smallest unit.
    pub decimals: u8,
    /// Maximum supply as a decimal string, in smallest units.
    pub max_supply: String,
    /// Transfer fee in units of 0.001% (XRPL MPToken convention).
    pub transfer_fee: u16,
    /// Optional metadata URI embedded in the on-chain metadata record.
    pub metadata_uri: Option<String>,
}

/// Result of the XRPL issuance step.
///
/// `issuance_id` is `Some` exactly when `status` is `Success`; the pipeline
/// treats a success without an id as a malformed response, not a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceRecord {
    pub status: StepStatus,
    /// Opaque MPT issuance identifier from the validated transaction metadata.
    pub issuance_id: Option<String>,
    /// Ledger result code (e.g. "tesSUCCESS", "tecDUPLICATE").
    pub result_code: Option<String>,
    /// Error message when status is Exception, preserved verbatim.
    pub error: Option<String>,
    pub token: TokenParams,
}

impl IssuanceRecord {
    pub fn success(token: &TokenParams, issuance_id: &str, result_code: &str) -> Self {
        Self {
            status: StepStatus::Success,
            issuance_id: Some(issuance_id.to_string()),
            result_code: Some(result_code.to_string()),
            error: None,
            token: token.clone(),
        }
    }

    pub fn rejected(token: &TokenParams, result_code: &str) -> Self {
        Self {
            status: StepStatus::Failed,
            issuance_id: None,
            result_code: Some(result_code.to_string()),
            error: None,
            token: token.clone(),
        }
    }

    pub fn exception(token: &TokenParams, error: String) -> Self {
        Self {
            status: StepStatus::Exception,
            issuance_id: None,
            result_code: None,
            error: Some(error),
            token: token.clone(),
        }
    }
}

/// Result of the mirror contract deployment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub status: StepStatus,
    pub contract_address: Option<Address>,
    pub tx_hash: Option<String>,
    pub error: Option<String>,
}

impl DeploymentResult {
    pub fn success(contract_address: Address, tx_hash: String) -> Self {
        Self {
            status: StepStatus::Success,
            contract_address: Some(contract_address),
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    pub fn exception(error: String) -> Self {
        Self {
            status: StepStatus::Exception,
            contract_address: None,
            tx_hash: None,
            error: Some(error),
        }
    }
}

/// Result of the simulated bridge mint step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeMintResult {
    pub status: StepStatus,
    pub tx_hash: Option<String>,
    pub error: Option<String>,
}

impl BridgeMintResult {
    pub fn success(tx_hash: String) -> Self {
        Self {
            status: StepStatus::Success,
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    pub fn exception(error: String) -> Self {
        Self {
            status: StepStatus::Exception,
            tx_hash: None,
            error: Some(error),
        }
    }
}

/// Pipeline state machine.
///
/// Linear: Init → Issued → Mirrored → PreVerified → Bridged → PostVerified →
/// Done, with any step transitioning to Aborted on failure. Terminal states
/// are Done and Aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Init,
    Issued,
    Mirrored,
    PreVerified,
    Bridged,
    PostVerified,
    Done,
    Aborted(String),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Init => write!(f, "init"),
            PipelineState::Issued => write!(f, "issued"),
            PipelineState::Mirrored => write!(f, "mirrored"),
            PipelineState::PreVerified => write!(f, "pre_verified"),
            PipelineState::Bridged => write!(f, "bridged"),
            PipelineState::PostVerified => write!(f, "post_verified"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// Terminal state plus every intermediate result, for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub state: PipelineState,
    pub issuance: Option<IssuanceRecord>,
    pub deployment: Option<DeploymentResult>,
    pub pre_bridge_balance: Option<i128>,
    pub bridge: Option<BridgeMintResult>,
    pub post_bridge_balance: Option<i128>,
}

impl PipelineReport {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Init,
            issuance: None,
            deployment: None,
            pre_bridge_balance: None,
            bridge: None,
            post_bridge_balance: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == PipelineState::Done
    }
}

impl Default for PipelineReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenParams {
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
    fn test_step_status_as_str() {
        assert_eq!(StepStatus::Success.as_str(), "success");
        assert_eq!(StepStatus::Failed.as_str(), "failed");
        assert_eq!(StepStatus::Exception.as_str(), "exception");
        assert!(StepStatus::Success.is_success());
        assert!(!StepStatus::Failed.is_success());
    }

    #[test]
    fn test_issuance_record_constructors() {
        let ok = IssuanceRecord::success(&token(), "00ABCDEF", "tesSUCCESS");
        assert_eq!(ok.status, StepStatus::Success);
        assert_eq!(ok.issuance_id.as_deref(), Some("00ABCDEF"));

        let rejected = IssuanceRecord::rejected(&token(), "tecDUPLICATE");
        assert_eq!(rejected.status, StepStatus::Failed);
        assert!(rejected.issuance_id.is_none());
        assert_eq!(rejected.result_code.as_deref(), Some("tecDUPLICATE"));

        let exc = IssuanceRecord::exception(&token(), "connection refused".to_string());
        assert_eq!(exc.status, StepStatus::Exception);
        assert_eq!(exc.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_pipeline_state_terminal() {
        assert!(!PipelineState::Init.is_terminal());
        assert!(!PipelineState::PostVerified.is_terminal());
        assert!(PipelineState::Done.is_terminal());
        assert!(PipelineState::Aborted("issuance failed".to_string()).is_terminal());
    }

    #[test]
    fn test_pipeline_state_display() {
        assert_eq!(format!("{}", PipelineState::PreVerified), "pre_verified");
        assert_eq!(
            format!("{}", PipelineState::Aborted("boom".to_string())),
            "aborted: boom"
        );
    }

    #[test]
    fn test_report_starts_at_init() {
        let report = PipelineReport::new();
        assert_eq!(report.state, PipelineState::Init);
        assert!(report.issuance.is_none());
        assert!(!report.is_done());
    }
}
