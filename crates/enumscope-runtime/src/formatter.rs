//! Enum value formatting.
//!
//! Turns a raw integral value plus an [`EnumTypeDescriptor`] into the text a
//! debugger shows for a variable of that type. Three paths are tried in
//! order:
//!
//! 1. exact match: the first-declared member with the same value,
//! 2. bit-flag decomposition (flag types, nonzero values only),
//! 3. the decimal numeral of the raw value.
//!
//! Formatting is total: every raw value yields a string.

use serde::{Deserialize, Serialize};

use crate::descriptor::EnumTypeDescriptor;
use crate::numeral;
use crate::value::RawEnumValue;

/// Which rule produced a formatted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatPath {
    ExactMatch,
    Decomposition,
    Numeral,
}

/// A formatted value together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatted {
    pub text: String,
    pub path: FormatPath,
}

/// Formats enum values. Holds only display settings; no per-call state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumFormatter {
    /// Placed between decomposed flag names (default: " | ")
    separator: String,
}

impl Default for EnumFormatter {
    fn default() -> Self {
        Self {
            separator: enumscope_config::DEFAULT_FLAGS_SEPARATOR.to_string(),
        }
    }
}

impl EnumFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with a custom flags separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Format a raw value read from the debuggee.
    ///
    /// A value carrying a different representation than the descriptor is
    /// reinterpreted at the descriptor's width.
    pub fn format(&self, descriptor: &EnumTypeDescriptor, raw: RawEnumValue) -> String {
        self.format_with_path(descriptor, raw).text
    }

    /// Format a numeric value.
    ///
    /// Values that do not fit the underlying type are truncated to its
    /// width rather than rejected.
    pub fn format_value(&self, descriptor: &EnumTypeDescriptor, value: i128) -> String {
        let repr = descriptor.repr();
        let raw = RawEnumValue::checked(value, repr).unwrap_or_else(|| {
            tracing::warn!(
                type_name = descriptor.name(),
                value,
                underlying = %repr,
                "raw value does not fit underlying type, truncating"
            );
            RawEnumValue::wrapping(value, repr)
        });
        self.format(descriptor, raw)
    }

    /// Format a raw value and report which rule fired.
    pub fn format_with_path(
        &self,
        descriptor: &EnumTypeDescriptor,
        raw: RawEnumValue,
    ) -> Formatted {
        let repr = descriptor.repr();
        if raw.repr() != repr {
            tracing::debug!(
                type_name = descriptor.name(),
                from = %raw.repr(),
                to = %repr,
                "reinterpreting raw value"
            );
        }
        let bits = raw.bits() & repr.width.mask();

        let formatted = if let Some(member) = descriptor.lookup(repr.to_i128(bits)) {
            Formatted {
                text: member.name().to_string(),
                path: FormatPath::ExactMatch,
            }
        } else if let Some(names) = decompose(descriptor, bits) {
            Formatted {
                text: names.join(self.separator.as_str()),
                path: FormatPath::Decomposition,
            }
        } else {
            Formatted {
                text: numeral::render_decimal(bits, repr),
                path: FormatPath::Numeral,
            }
        };

        tracing::trace!(
            type_name = descriptor.name(),
            bits,
            path = ?formatted.path,
            text = %formatted.text,
            "formatted enum value"
        );
        formatted
    }
}

/// Express `bits` as a union of flag members, least significant name first.
///
/// Candidates are tried from the largest value down so that composite flags
/// are taken before their parts; the collected names are then reversed.
/// Returns `None` for non-flag types, zero, or when some bits stay uncovered.
fn decompose(descriptor: &EnumTypeDescriptor, bits: u64) -> Option<Vec<&str>> {
    if !descriptor.is_bit_flags() || bits == 0 {
        return None;
    }

    let mut remaining = bits;
    let mut matched = Vec::new();
    for member in descriptor.flag_candidates() {
        let flag = member.bits();
        if remaining & flag == flag {
            matched.push(member.name());
            remaining &= !flag;
        }
    }

    if remaining != 0 {
        return None;
    }
    matched.reverse();
    Some(matched)
}

/// Format `value` with the default formatter.
pub fn format_enum(descriptor: &EnumTypeDescriptor, value: i128) -> String {
    EnumFormatter::default().format_value(descriptor, value)
}
