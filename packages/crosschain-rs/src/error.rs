//! Error taxonomy for adapter boundaries.
//!
//! Business-level failures never propagate past an adapter: each adapter
//! folds them into its result struct. `StepError` exists to classify what
//! went wrong on the way there, and for configuration checks that must fail
//! before any network I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    /// Missing or malformed required input. Fatal, raised before any
    /// network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The network accepted the call but the transaction's result code
    /// indicates failure.
    #[error("transaction rejected with result code {code}")]
    TransactionRejected { code: String },

    /// The network reported success but an expected field is absent.
    /// Distinct from rejection: it signals a broken response, not a
    /// business failure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Network/RPC failure or any other error from the underlying client.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Check that a private key string decodes as exactly 32 bytes of hex.
///
/// Runs at configuration time, before any client is constructed, so a bad
/// key never reaches the network.
pub fn validate_private_key(key: &str) -> Result<(), StepError> {
    let stripped = key.strip_prefix("0x").unwrap_or(key);
    let bytes = hex::decode(stripped).map_err(|_| {
        StepError::Configuration("private key is not a valid hexadecimal string".to_string())
    })?;
    if bytes.len() != 32 {
        return Err(StepError::Configuration(format!(
            "private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_private_key_accepts_hex() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        assert!(validate_private_key(key).is_ok());
        assert!(validate_private_key(key.trim_start_matches("0x")).is_ok());
    }

    #[test]
    fn test_validate_private_key_rejects_non_hex() {
        let err = validate_private_key("not-hex").unwrap_err();
        assert!(matches!(err, StepError::Configuration(_)));
        assert!(err.to_string().contains("hexadecimal"));
    }

    #[test]
    fn test_validate_private_key_rejects_wrong_length() {
        let err = validate_private_key("0xdeadbeef").unwrap_err();
        assert!(matches!(err, StepError::Configuration(_)));
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_error_messages() {
        let rejected = StepError::TransactionRejected {
            code: "tecDUPLICATE".to_string(),
        };
        assert_eq!(
            rejected.to_string(),
            "transaction rejected with result code tecDUPLICATE"
        );

        let malformed = StepError::MalformedResponse("missing field".to_string());
        assert!(malformed.to_string().starts_with("malformed response"));
    }
}
