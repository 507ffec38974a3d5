//! Compact ("nBits") encoding of 256-bit difficulty targets.
//!
//! The compact form is a base-256 float: the high byte is the length of the
//! value in bytes and the low 23 bits are the most significant digits. Bit 23
//! is a sign bit, so a mantissa with that bit set is shifted down one byte and
//! the exponent is bumped instead.

use primitive_types::U256;

use crate::error::TypesError;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Encode a target in compact form. Precision below the top three bytes
/// is discarded.
pub fn target_to_compact(target: &U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (*target >> (8 * (size - 3))).low_u64() as u32
    };
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | ((size as u32) << 24)
}

/// Decode a compact target. Negative and overflowing encodings are rejected.
pub fn compact_to_target(bits: u32) -> Result<U256, TypesError> {
    let size = (bits >> 24) as usize;
    let word = bits & MANTISSA_MASK;
    if word != 0 && bits & SIGN_BIT != 0 {
        return Err(TypesError::NegativeCompact { bits });
    }
    if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
        return Err(TypesError::CompactOverflow { bits });
    }
    let target = if size <= 3 {
        U256::from(word >> (8 * (3 - size)))
    } else {
        U256::from(word) << (8 * (size - 3))
    };
    Ok(target)
}

/// The target `U256::MAX >> shift`, the form every proof-of-work limit takes.
pub fn limit_from_shift(shift: u32) -> U256 {
    U256::MAX >> (shift as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_limits() {
        assert_eq!(target_to_compact(&limit_from_shift(20)), 0x1e0f_ffff);
        assert_eq!(target_to_compact(&limit_from_shift(12)), 0x1f0f_ffff);
        assert_eq!(target_to_compact(&limit_from_shift(1)), 0x207f_ffff);
        assert_eq!(target_to_compact(&limit_from_shift(32)), 0x1d00_ffff);
    }

    #[test]
    fn test_small_values() {
        assert_eq!(target_to_compact(&U256::zero()), 0);
        assert_eq!(target_to_compact(&U256::from(0x12u32)), 0x0112_0000);
        assert_eq!(target_to_compact(&U256::from(0x80u32)), 0x0200_8000);
        assert_eq!(compact_to_target(0x0112_0000).unwrap(), U256::from(0x12u32));
    }

    #[test]
    fn test_decode_truncates_to_mantissa() {
        let decoded = compact_to_target(0x1e0f_ffff).unwrap();
        assert!(decoded <= limit_from_shift(20));
        assert_eq!(decoded, U256::from(0x0f_ffffu32) << (8 * 27usize));
    }

    #[test]
    fn test_decode_rejects_negative() {
        assert_eq!(
            compact_to_target(0x0480_0001),
            Err(TypesError::NegativeCompact { bits: 0x0480_0001 })
        );
    }

    #[test]
    fn test_decode_rejects_overflow() {
        assert_eq!(
            compact_to_target(0xff12_3456),
            Err(TypesError::CompactOverflow { bits: 0xff12_3456 })
        );
    }

    proptest! {
        #[test]
        fn prop_compact_is_canonical(mantissa in 1u32..=MANTISSA_MASK, size in 3u32..=32) {
            let bits = (size << 24) | mantissa;
            let target = compact_to_target(bits).unwrap();
            let normalized = target_to_compact(&target);
            prop_assert_eq!(compact_to_target(normalized).unwrap(), target);
        }

        #[test]
        fn prop_shift_limits_decode_below_limit(shift in 1u32..=200) {
            let limit = limit_from_shift(shift);
            let decoded = compact_to_target(target_to_compact(&limit)).unwrap();
            prop_assert!(decoded <= limit);
        }
    }
}
