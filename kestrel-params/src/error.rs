use kestrel_types::network::NetworkKind;
use thiserror::Error;

/// Errors raised while building or selecting network parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("{network} genesis hash mismatch: expected {expected}, computed {actual}")]
    GenesisHashMismatch {
        network: NetworkKind,
        expected: String,
        actual: String,
    },

    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {actual}")]
    MerkleRootMismatch {
        network: NetworkKind,
        expected: String,
        actual: String,
    },

    #[error("invalid compiled-in constant {field}: {reason}")]
    InvalidConstant { field: &'static str, reason: String },

    #[error("--testnet and --regtest are mutually exclusive")]
    ConflictingNetworkFlags,

    #[error("network already selected ({current})")]
    NetworkAlreadySelected { current: NetworkKind },
}

impl ParamsError {
    /// True for errors that mean the compiled-in parameters themselves are
    /// wrong, as opposed to the operator asking for something invalid.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            ParamsError::GenesisHashMismatch { .. }
                | ParamsError::MerkleRootMismatch { .. }
                | ParamsError::InvalidConstant { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_mismatch_display() {
        let err = ParamsError::GenesisHashMismatch {
            network: NetworkKind::Test,
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Test network"));
        assert!(msg.contains("expected aa"));
        assert!(err.is_integrity_failure());
    }

    #[test]
    fn test_flag_conflict_is_operator_error() {
        let err = ParamsError::ConflictingNetworkFlags;
        assert_eq!(
            err.to_string(),
            "--testnet and --regtest are mutually exclusive"
        );
        assert!(!err.is_integrity_failure());
    }
}
