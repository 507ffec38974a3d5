use thiserror::Error;

/// Errors produced while decoding kestrel primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("invalid hash length: expected 32 bytes, got {len}")]
    InvalidHashLength { len: usize },

    #[error("compact bits {bits:#010x} encode a negative target")]
    NegativeCompact { bits: u32 },

    #[error("compact bits {bits:#010x} overflow 256 bits")]
    CompactOverflow { bits: u32 },
}
