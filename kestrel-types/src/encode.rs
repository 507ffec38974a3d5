//! Consensus wire encoding.
//!
//! This is the byte layout that transaction ids, merkle roots and block
//! hashes are computed over. It is little-endian throughout with
//! Bitcoin-style compact-size length prefixes, and is deliberately separate
//! from the borsh encoding used for local storage.

/// Types with a canonical consensus byte encoding.
pub trait Encodable {
    /// Append the consensus encoding of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// The consensus encoding of `self` as a fresh buffer.
    fn to_consensus_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

/// Append a compact-size unsigned integer.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Append a length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.len() as u64);
        for item in self {
            item.encode(out);
        }
    }
}
