// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Variable-length unsigned integers, six data bits per byte.
//!
//! Byte layout (most significant group first):
//! ```text
//! bit  7   6   5..0
//!      C   0   data
//! ```
//! `C = 1` on every byte except the last. Values `0..=63` fit in one byte. At
//! most [`MAX_VARINT_LEN`] bytes are written, which caps values at
//! [`VARINT_MAX`] (30 bits).

use thiserror::Error;

/// Longest encoding, in bytes.
pub const MAX_VARINT_LEN: usize = 5;

/// Largest encodable value (`2^30 - 1`).
pub const VARINT_MAX: u32 = (1 << (DATA_BITS * MAX_VARINT_LEN as u32)) - 1;

const DATA_BITS: u32 = 6;
const DATA_MASK: u32 = 0x3F;
const CONTINUE: u8 = 0x80;

/// Errors produced by the varint codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintError {
    /// The value needs more than [`MAX_VARINT_LEN`] bytes.
    #[error("value {value} exceeds varint maximum {VARINT_MAX}")]
    Overflow {
        /// Rejected value.
        value: u64,
    },
    /// Input ended while the continuation bit was still set.
    #[error("truncated varint")]
    Truncated,
    /// More than [`MAX_VARINT_LEN`] bytes carried the continuation bit.
    #[error("varint longer than {MAX_VARINT_LEN} bytes")]
    TooLong,
}

/// An encoded varint held inline.
///
/// ```
/// use ldraw_core::Varint;
/// let v = Varint::encode(100).unwrap();
/// assert_eq!(v.as_bytes(), &[0x81, 0x24]);
/// assert_eq!(Varint::decode(v.as_bytes()).unwrap(), (100, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varint {
    value: u32,
    buf: [u8; MAX_VARINT_LEN],
    len: u8,
}

impl Varint {
    /// Encodes `value`, failing when it exceeds [`VARINT_MAX`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(value: u32) -> Result<Self, VarintError> {
        if value > VARINT_MAX {
            return Err(VarintError::Overflow {
                value: u64::from(value),
            });
        }
        let mut groups = 1;
        while groups < MAX_VARINT_LEN && value >> (DATA_BITS * groups as u32) != 0 {
            groups += 1;
        }
        let mut buf = [0u8; MAX_VARINT_LEN];
        for (i, byte) in buf.iter_mut().take(groups).enumerate() {
            let shift = DATA_BITS * (groups - 1 - i) as u32;
            let group = ((value >> shift) & DATA_MASK) as u8;
            *byte = if i + 1 < groups { group | CONTINUE } else { group };
        }
        Ok(Self {
            value,
            buf,
            len: groups as u8,
        })
    }

    /// Encodes a byte length, failing when it exceeds [`VARINT_MAX`].
    pub fn encode_len(len: usize) -> Result<Self, VarintError> {
        let value = u32::try_from(len).map_err(|_| VarintError::Overflow {
            value: len as u64,
        })?;
        Self::encode(value)
    }

    /// Decodes one varint from the front of `bytes`.
    ///
    /// Returns the value and the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> Result<(u32, usize), VarintError> {
        let mut value = 0u32;
        for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
            value = (value << DATA_BITS) | (u32::from(byte) & DATA_MASK);
            if byte & CONTINUE == 0 {
                return Ok((value, i + 1));
            }
        }
        if bytes.len() >= MAX_VARINT_LEN {
            Err(VarintError::TooLong)
        } else {
            Err(VarintError::Truncated)
        }
    }

    /// The encoded value.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.len)]
    }

    /// Number of encoded bytes (1..=5).
    pub const fn encoded_len(&self) -> usize {
        self.len as usize
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_single_bytes() {
        assert_eq!(Varint::encode(0).unwrap().as_bytes(), &[0x00]);
        assert_eq!(Varint::encode(3).unwrap().as_bytes(), &[0x03]);
        assert_eq!(Varint::encode(63).unwrap().as_bytes(), &[0x3F]);
    }

    #[test]
    fn multi_byte_is_msb_group_first() {
        // 64 = 0b01_000000 -> groups [1, 0]
        assert_eq!(Varint::encode(64).unwrap().as_bytes(), &[0x81, 0x00]);
        // 4095 = two full groups
        assert_eq!(Varint::encode(4095).unwrap().as_bytes(), &[0xBF, 0x3F]);
        assert_eq!(Varint::encode(4096).unwrap().as_bytes(), &[0x81, 0x80, 0x00]);
    }

    #[test]
    fn maximum_uses_five_bytes() {
        let v = Varint::encode(VARINT_MAX).unwrap();
        assert_eq!(v.as_bytes(), &[0xBF, 0xBF, 0xBF, 0xBF, 0x3F]);
        assert_eq!(v.encoded_len(), MAX_VARINT_LEN);
        assert_eq!(VARINT_MAX, (1 << 30) - 1);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(
            Varint::encode(VARINT_MAX + 1),
            Err(VarintError::Overflow {
                value: u64::from(VARINT_MAX) + 1
            })
        );
        assert!(Varint::encode_len(usize::MAX).is_err());
    }

    #[test]
    fn decode_reports_consumed_bytes() {
        assert_eq!(Varint::decode(&[0x81, 0x00, 0xFF]).unwrap(), (64, 2));
    }

    #[test]
    fn decode_rejects_truncated_and_overlong() {
        assert_eq!(Varint::decode(&[]), Err(VarintError::Truncated));
        assert_eq!(Varint::decode(&[0x81, 0x81]), Err(VarintError::Truncated));
        assert_eq!(
            Varint::decode(&[0x81, 0x81, 0x81, 0x81, 0x81, 0x00]),
            Err(VarintError::TooLong)
        );
    }
}
