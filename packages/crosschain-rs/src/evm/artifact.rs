//! Compiled contract artifact loading
//!
//! The mirrored token contract is compiled externally (Hardhat layout) and
//! located by a well-known path under the artifacts root:
//! `contracts/<Name>.sol/<Name>.json`.

use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Well-known name of the mirrored token contract.
pub const MIRROR_CONTRACT_NAME: &str = "BridgedMPToken";

/// Hardhat-style compiled artifact: ABI plus creation bytecode.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: serde_json::Value,
    pub bytecode: String,
    #[serde(rename = "contractName", default)]
    pub contract_name: Option<String>,
}

impl ContractArtifact {
    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: ContractArtifact =
            serde_json::from_str(content).wrap_err("Failed to parse contract artifact JSON")?;
        Ok(artifact)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read artifact at {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Load a named contract from the artifacts root.
    pub fn load(artifacts_root: &Path, contract: &str) -> Result<Self> {
        Self::from_file(&artifact_path(artifacts_root, contract))
    }

    /// Decode the creation bytecode into raw bytes.
    pub fn bytecode_bytes(&self) -> Result<Vec<u8>> {
        let stripped = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        let bytes = hex::decode(stripped)
            .map_err(|e| eyre!("Artifact bytecode is not valid hex: {}", e))?;
        if bytes.is_empty() {
            return Err(eyre!("Artifact bytecode is empty"));
        }
        Ok(bytes)
    }
}

/// Well-known artifact path for a contract name.
pub fn artifact_path(artifacts_root: &Path, contract: &str) -> PathBuf {
    artifacts_root
        .join("contracts")
        .join(format!("{}.sol", contract))
        .join(format!("{}.json", contract))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let artifact = ContractArtifact::from_json(
            r#"{"contractName":"BridgedMPToken","abi":[],"bytecode":"0x6080604052"}"#,
        )
        .unwrap();
        assert_eq!(artifact.contract_name.as_deref(), Some("BridgedMPToken"));
        assert_eq!(
            artifact.bytecode_bytes().unwrap(),
            vec![0x60, 0x80, 0x60, 0x40, 0x52]
        );
    }

    #[test]
    fn test_bytecode_without_prefix() {
        let artifact =
            ContractArtifact::from_json(r#"{"abi":[],"bytecode":"6080"}"#).unwrap();
        assert_eq!(artifact.bytecode_bytes().unwrap(), vec![0x60, 0x80]);
    }

    #[test]
    fn test_invalid_bytecode_hex() {
        let artifact =
            ContractArtifact::from_json(r#"{"abi":[],"bytecode":"0xzz"}"#).unwrap();
        assert!(artifact.bytecode_bytes().is_err());
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let artifact = ContractArtifact::from_json(r#"{"abi":[],"bytecode":"0x"}"#).unwrap();
        assert!(artifact.bytecode_bytes().is_err());
    }

    #[test]
    fn test_artifact_path_layout() {
        let path = artifact_path(Path::new("artifacts"), MIRROR_CONTRACT_NAME);
        assert_eq!(
            path,
            Path::new("artifacts/contracts/BridgedMPToken.sol/BridgedMPToken.json")
        );
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir
            .path()
            .join("contracts")
            .join("BridgedMPToken.sol");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            nested.join("BridgedMPToken.json"),
            r#"{"contractName":"BridgedMPToken","abi":[],"bytecode":"0x60806040"}"#,
        )
        .unwrap();

        let artifact = ContractArtifact::load(dir.path(), MIRROR_CONTRACT_NAME).unwrap();
        assert_eq!(artifact.bytecode_bytes().unwrap().len(), 4);
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContractArtifact::load(dir.path(), MIRROR_CONTRACT_NAME).unwrap_err();
        assert!(err.to_string().contains("Failed to read artifact"));
    }
}
