use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::encode::{write_var_bytes, Encodable};

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;

/// A raw script. Only the builder side lives here; nothing in this crate
/// interprets scripts.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Script(pub Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Push a small integer, using the dedicated opcodes for 0, -1 and 1..=16.
    pub fn push_int(mut self, n: i64) -> Self {
        match n {
            0 => self.0.push(OP_0),
            -1 => self.0.push(OP_1NEGATE),
            1..=16 => self.0.push(OP_1 + (n as u8) - 1),
            _ => return self.push_slice(&encode_script_num(n)),
        }
        self
    }

    /// Push an integer as a data element in script-number encoding, even when
    /// a dedicated opcode exists for it.
    pub fn push_num(self, n: i64) -> Self {
        self.push_slice(&encode_script_num(n))
    }

    /// Push raw bytes with the shortest push prefix for their length.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }
}

impl Encodable for Script {
    fn encode(&self, out: &mut Vec<u8>) {
        write_var_bytes(out, &self.0);
    }
}

/// Minimal little-endian magnitude with the sign carried in the top bit of
/// the last byte. Zero encodes as the empty vector.
pub fn encode_script_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_int_uses_small_opcodes() {
        let script = Script::new().push_int(0).push_int(1).push_int(16).push_int(-1);
        assert_eq!(script.0, vec![OP_0, 0x51, 0x60, OP_1NEGATE]);
    }

    #[test]
    fn test_push_num_always_pushes_data() {
        let script = Script::new().push_num(42);
        assert_eq!(script.0, vec![0x01, 0x2a]);
        let script = Script::new().push_num(4);
        assert_eq!(script.0, vec![0x01, 0x04]);
    }

    #[test]
    fn test_script_num_sign_handling() {
        assert_eq!(encode_script_num(0), Vec::<u8>::new());
        assert_eq!(encode_script_num(127), vec![0x7f]);
        assert_eq!(encode_script_num(128), vec![0x80, 0x00]);
        assert_eq!(encode_script_num(-1), vec![0x81]);
        assert_eq!(encode_script_num(-128), vec![0x80, 0x80]);
        assert_eq!(encode_script_num(0x1234), vec![0x34, 0x12]);
    }

    #[test]
    fn test_push_slice_prefixes() {
        let short = Script::new().push_slice(&[7u8; 75]);
        assert_eq!(short.0[0], 75);
        let medium = Script::new().push_slice(&[7u8; 80]);
        assert_eq!(&medium.0[..2], &[OP_PUSHDATA1, 80]);
        let long = Script::new().push_slice(&[7u8; 300]);
        assert_eq!(&long.0[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
        assert_eq!(long.len(), 303);
    }
}
