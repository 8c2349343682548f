//! Underlying integer representations and raw enum values.
//!
//! An enum value read from the debuggee is kept as a bit pattern masked to the
//! underlying width. Signedness only matters when the bits are turned back into
//! a number (ordering, numeral rendering).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::DescriptorError;
use crate::numeral;

/// Width of an enum's underlying integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Number of bits.
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Number of bytes occupied in target memory.
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Mask selecting the low `bits()` bits of a `u64`.
    pub const fn mask(self) -> u64 {
        match self {
            Width::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Width for a bit count, if it is one of 8/16/32/64.
    pub const fn from_bits(bits: u32) -> Option<Width> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }
}

/// Underlying integer type of an enumeration: width plus signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerRepr {
    pub width: Width,
    pub signed: bool,
}

impl IntegerRepr {
    pub const I8: IntegerRepr = IntegerRepr::new(Width::W8, true);
    pub const U8: IntegerRepr = IntegerRepr::new(Width::W8, false);
    pub const I16: IntegerRepr = IntegerRepr::new(Width::W16, true);
    pub const U16: IntegerRepr = IntegerRepr::new(Width::W16, false);
    pub const I32: IntegerRepr = IntegerRepr::new(Width::W32, true);
    pub const U32: IntegerRepr = IntegerRepr::new(Width::W32, false);
    pub const I64: IntegerRepr = IntegerRepr::new(Width::W64, true);
    pub const U64: IntegerRepr = IntegerRepr::new(Width::W64, false);

    pub const fn new(width: Width, signed: bool) -> Self {
        Self { width, signed }
    }

    /// Parse a Rust-style primitive name (`"u8"`, `"i32"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        let (signed, bits) = match name.as_bytes().first()? {
            b'i' => (true, &name[1..]),
            b'u' => (false, &name[1..]),
            _ => return None,
        };
        let width = Width::from_bits(bits.parse().ok()?)?;
        Some(Self::new(width, signed))
    }

    /// Smallest representable value.
    pub fn min(self) -> i128 {
        if self.signed {
            -(1i128 << (self.width.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value.
    pub fn max(self) -> i128 {
        if self.signed {
            (1i128 << (self.width.bits() - 1)) - 1
        } else {
            self.width.mask() as i128
        }
    }

    /// Whether `value` fits without truncation.
    pub fn contains(self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    /// Two's complement bit pattern of `value`, truncated to the width.
    pub fn to_bits(self, value: i128) -> u64 {
        (value as u64) & self.width.mask()
    }

    /// Numeric value of a bit pattern, sign-extended for signed types.
    pub fn to_i128(self, bits: u64) -> i128 {
        let bits = bits & self.width.mask();
        if self.signed {
            let shift = 64 - self.width.bits();
            (((bits << shift) as i64) >> shift) as i128
        } else {
            bits as i128
        }
    }
}

impl fmt::Display for IntegerRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { 'i' } else { 'u' };
        write!(f, "{}{}", prefix, self.width.bits())
    }
}

/// Raw integral value of one enum-typed variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawEnumValue {
    bits: u64,
    repr: IntegerRepr,
}

impl RawEnumValue {
    /// Build from a bit pattern; bits above the width are dropped.
    pub fn from_bits(bits: u64, repr: IntegerRepr) -> Self {
        Self {
            bits: bits & repr.width.mask(),
            repr,
        }
    }

    /// Build from a number, or `None` if it does not fit `repr`.
    pub fn checked(value: i128, repr: IntegerRepr) -> Option<Self> {
        repr.contains(value).then(|| Self::from_bits(repr.to_bits(value), repr))
    }

    /// Build from a number, truncating it to the width of `repr`.
    pub fn wrapping(value: i128, repr: IntegerRepr) -> Self {
        Self::from_bits(repr.to_bits(value), repr)
    }

    /// Decode a little-endian value read from target memory.
    ///
    /// Extra trailing bytes are ignored.
    pub fn from_le_bytes(bytes: &[u8], repr: IntegerRepr) -> Result<Self, DescriptorError> {
        let needed = repr.width.bytes();
        if bytes.len() < needed {
            return Err(DescriptorError::ShortRead {
                expected: needed,
                actual: bytes.len(),
            });
        }
        let mut buf = [0u8; 8];
        buf[..needed].copy_from_slice(&bytes[..needed]);
        Ok(Self::from_bits(u64::from_le_bytes(buf), repr))
    }

    pub fn bits(self) -> u64 {
        self.bits
    }

    pub fn repr(self) -> IntegerRepr {
        self.repr
    }

    pub fn as_i128(self) -> i128 {
        self.repr.to_i128(self.bits)
    }

    pub fn is_zero(self) -> bool {
        self.bits == 0
    }
}

impl fmt::Display for RawEnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&numeral::render_decimal(self.bits, self.repr))
    }
}
