use crate::error::TypesError;

/// 32-byte double-SHA-256 digest, stored in internal (little-endian) byte order.
pub type Hash = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Four-byte prefix that starts every wire message on a given network.
pub type Magic = [u8; 4];

/// The all-zero hash, used as the previous-block hash of a genesis block
/// and as the outpoint hash of a coinbase input.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Parse a hash written in display order (most significant byte first, as
/// block explorers and RPC output show it). A leading `0x` is accepted.
pub fn hash_from_display_hex(s: &str) -> Result<Hash, TypesError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let mut bytes = hex::decode(trimmed).map_err(|e| TypesError::InvalidHex {
        reason: e.to_string(),
    })?;
    if bytes.len() != 32 {
        return Err(TypesError::InvalidHashLength { len: bytes.len() });
    }
    bytes.reverse();
    let mut hash = ZERO_HASH;
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// Render a hash in display order.
pub fn hash_to_display_hex(hash: &Hash) -> String {
    let mut bytes = *hash;
    bytes.reverse();
    hex::encode(bytes)
}
