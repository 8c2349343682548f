//! Decimal rendering of raw enum values that have no name.

use crate::value::{IntegerRepr, Width};

/// Render `bits` as a plain decimal numeral in the given representation.
///
/// Unsigned types never carry a sign, signed types are read as two's
/// complement at their declared width. Bits above the width are ignored.
pub fn render_decimal(bits: u64, repr: IntegerRepr) -> String {
    match (repr.width, repr.signed) {
        (Width::W8, false) => (bits as u8).to_string(),
        (Width::W8, true) => (bits as u8 as i8).to_string(),
        (Width::W16, false) => (bits as u16).to_string(),
        (Width::W16, true) => (bits as u16 as i16).to_string(),
        (Width::W32, false) => (bits as u32).to_string(),
        (Width::W32, true) => (bits as u32 as i32).to_string(),
        (Width::W64, false) => bits.to_string(),
        (Width::W64, true) => (bits as i64).to_string(),
    }
}
