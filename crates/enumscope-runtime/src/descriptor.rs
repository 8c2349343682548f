//! Enum type descriptors.
//!
//! A descriptor is the fully-resolved, immutable description of one
//! enumeration type: its underlying integer representation, whether it is a
//! bit-flag enumeration, and its members in declaration order. Members are
//! owned once; the value-ascending view is an index array computed on first
//! use and cached next to them.

use std::sync::OnceLock;

use enumscope_config::EnumDefinition;
use thiserror::Error;

use crate::value::IntegerRepr;

/// Errors raised while building descriptors or decoding raw values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("unsupported underlying type '{0}'")]
    UnsupportedUnderlying(String),

    #[error("member '{member}' value {value} does not fit underlying type {underlying}")]
    ValueOutOfRange {
        member: String,
        value: i128,
        underlying: IntegerRepr,
    },

    #[error("unknown enum type '{0}'")]
    UnknownType(String),

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

/// One declared `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    name: String,
    value: i128,
    bits: u64,
}

impl EnumMember {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared numeric value.
    pub fn value(&self) -> i128 {
        self.value
    }

    /// Value as a bit pattern of the underlying width.
    pub fn bits(&self) -> u64 {
        self.bits
    }
}

/// Immutable description of one enumeration type.
#[derive(Debug, Clone)]
pub struct EnumTypeDescriptor {
    name: String,
    repr: IntegerRepr,
    is_bit_flags: bool,
    members: Box<[EnumMember]>,
    /// Indices into `members`, sorted by value, stable on ties.
    ascending: OnceLock<Box<[usize]>>,
}

impl EnumTypeDescriptor {
    /// Build a descriptor from members in declaration order.
    ///
    /// Member names are not checked for uniqueness and values need not be
    /// distinct or powers of two. Every value must fit `repr`.
    pub fn new<I, S>(
        name: impl Into<String>,
        repr: IntegerRepr,
        is_bit_flags: bool,
        members: I,
    ) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = (S, i128)>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .map(|(name, value)| {
                let name = name.into();
                if !repr.contains(value) {
                    return Err(DescriptorError::ValueOutOfRange {
                        member: name,
                        value,
                        underlying: repr,
                    });
                }
                Ok(EnumMember {
                    name,
                    value,
                    bits: repr.to_bits(value),
                })
            })
            .collect::<Result<Box<[_]>, _>>()?;

        Ok(Self {
            name: name.into(),
            repr,
            is_bit_flags,
            members,
            ascending: OnceLock::new(),
        })
    }

    /// Start building a descriptor member by member.
    pub fn builder(name: impl Into<String>, repr: IntegerRepr) -> EnumTypeBuilder {
        EnumTypeBuilder {
            name: name.into(),
            repr,
            is_bit_flags: false,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repr(&self) -> IntegerRepr {
        self.repr
    }

    pub fn is_bit_flags(&self) -> bool {
        self.is_bit_flags
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// First-declared member whose value equals `value`.
    pub fn lookup(&self, value: i128) -> Option<&EnumMember> {
        self.matching(value).next()
    }

    /// All members whose value equals `value`, in declaration order.
    pub fn matching(&self, value: i128) -> impl Iterator<Item = &EnumMember> + '_ {
        self.members.iter().filter(move |m| m.value == value)
    }

    /// Members ordered by value ascending; ties keep declaration order.
    pub fn ascending(&self) -> impl Iterator<Item = &EnumMember> + '_ {
        self.ascending_index().iter().map(|&i| &self.members[i])
    }

    /// Distinct nonzero member values in descending order, one member per
    /// value (the first declared).
    pub fn flag_candidates(&self) -> Vec<&EnumMember> {
        let mut candidates: Vec<&EnumMember> = Vec::with_capacity(self.members.len());
        for member in self.ascending() {
            if member.bits == 0 {
                continue;
            }
            if candidates.last().is_some_and(|prev| prev.value == member.value) {
                continue;
            }
            candidates.push(member);
        }
        candidates.reverse();
        candidates
    }

    fn ascending_index(&self) -> &[usize] {
        self.ascending.get_or_init(|| {
            let mut index: Vec<usize> = (0..self.members.len()).collect();
            // `sort_by_key` is stable, so equal values stay in declaration order.
            index.sort_by_key(|&i| self.members[i].value);
            index.into_boxed_slice()
        })
    }
}

impl TryFrom<&EnumDefinition> for EnumTypeDescriptor {
    type Error = DescriptorError;

    fn try_from(def: &EnumDefinition) -> Result<Self, Self::Error> {
        let repr = IntegerRepr::parse(&def.underlying)
            .ok_or_else(|| DescriptorError::UnsupportedUnderlying(def.underlying.clone()))?;
        Self::new(
            def.name.clone(),
            repr,
            def.flags,
            def.members
                .iter()
                .map(|m| (m.name.clone(), i128::from(m.value))),
        )
    }
}

/// Incremental descriptor construction.
#[derive(Debug, Clone)]
pub struct EnumTypeBuilder {
    name: String,
    repr: IntegerRepr,
    is_bit_flags: bool,
    members: Vec<(String, i128)>,
}

impl EnumTypeBuilder {
    /// Mark the type as a bit-flag enumeration.
    pub fn flags(mut self, is_bit_flags: bool) -> Self {
        self.is_bit_flags = is_bit_flags;
        self
    }

    /// Append a member; call order is declaration order.
    pub fn member(mut self, name: impl Into<String>, value: i128) -> Self {
        self.members.push((name.into(), value));
        self
    }

    pub fn build(self) -> Result<EnumTypeDescriptor, DescriptorError> {
        EnumTypeDescriptor::new(self.name, self.repr, self.is_bit_flags, self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format_enum;
    use enumscope_config::MemberDefinition;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn names<'a>(members: impl Iterator<Item = &'a EnumMember>) -> Vec<&'a str> {
        members.map(|m| m.name()).collect()
    }

    fn legacy() -> EnumTypeDescriptor {
        EnumTypeDescriptor::builder("Legacy", IntegerRepr::I32)
            .flags(true)
            .member("both", 3)
            .member("b", 2)
            .member("a", 1)
            .member("alias_b", 2)
            .member("none", 0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_members_keep_declaration_order() {
        let desc = legacy();
        assert_eq!(
            names(desc.members().iter()),
            vec!["both", "b", "a", "alias_b", "none"]
        );
    }

    #[test]
    fn test_ascending_is_stable_on_ties() {
        let desc = legacy();
        assert_eq!(
            names(desc.ascending()),
            vec!["none", "a", "b", "alias_b", "both"]
        );
        // Cached view is reused.
        assert_eq!(names(desc.ascending()).len(), 5);
    }

    #[test]
    fn test_lookup_first_declared_wins() {
        let desc = legacy();
        assert_eq!(desc.lookup(2).map(EnumMember::name), Some("b"));
        assert_eq!(names(desc.matching(2)), vec!["b", "alias_b"]);
        assert!(desc.lookup(8).is_none());
        assert_eq!(desc.matching(8).count(), 0);
    }

    #[test]
    fn test_flag_candidates_descending_distinct_nonzero() {
        let desc = legacy();
        assert_eq!(names(desc.flag_candidates().into_iter()), vec!["both", "b", "a"]);
    }

    #[test]
    fn test_signed_ordering() {
        let desc = EnumTypeDescriptor::new(
            "Signed",
            IntegerRepr::I8,
            false,
            [("max", 127), ("min", -128), ("zero", 0)],
        )
        .unwrap();
        assert_eq!(names(desc.ascending()), vec!["min", "zero", "max"]);
        let min = IntegerRepr::I8.to_i128(0x80);
        assert_eq!(desc.lookup(min).map(EnumMember::name), Some("min"));
    }

    #[test]
    fn test_value_out_of_range_rejected() {
        let err = EnumTypeDescriptor::builder("Small", IntegerRepr::U8)
            .member("big", 256)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::ValueOutOfRange {
                member: "big".to_string(),
                value: 256,
                underlying: IntegerRepr::U8,
            }
        );
        assert_eq!(
            err.to_string(),
            "member 'big' value 256 does not fit underlying type u8"
        );
    }

    #[test]
    fn test_duplicate_names_tolerated() {
        let desc = EnumTypeDescriptor::new("Dup", IntegerRepr::I32, false, [("x", 1), ("x", 2)]);
        assert!(desc.is_ok());
    }

    #[test]
    fn test_from_definition() {
        let def = EnumDefinition {
            name: "FileAccess".to_string(),
            underlying: "u16".to_string(),
            flags: true,
            members: vec![
                MemberDefinition {
                    name: "read".to_string(),
                    value: 1,
                },
                MemberDefinition {
                    name: "write".to_string(),
                    value: 2,
                },
            ],
        };
        let desc = EnumTypeDescriptor::try_from(&def).unwrap();
        assert_eq!(desc.name(), "FileAccess");
        assert_eq!(desc.repr(), IntegerRepr::U16);
        assert!(desc.is_bit_flags());
        assert_eq!(desc.members().len(), 2);
    }

    #[test]
    fn test_from_definition_negative_unsigned() {
        let def = EnumDefinition {
            name: "Bad".to_string(),
            underlying: "u32".to_string(),
            flags: false,
            members: vec![MemberDefinition {
                name: "neg".to_string(),
                value: -1,
            }],
        };
        assert!(matches!(
            EnumTypeDescriptor::try_from(&def),
            Err(DescriptorError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_descriptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EnumTypeDescriptor>();
    }

    #[test]
    fn test_concurrent_first_use_sees_one_order() {
        // Threads start together so the ascending index is built under contention.
        const THREADS: usize = 8;
        let desc = Arc::new(
            EnumTypeDescriptor::builder("Shared", IntegerRepr::U8)
                .flags(true)
                .member("c", 4)
                .member("a", 1)
                .member("b", 2)
                .member("a2", 1)
                .build()
                .unwrap(),
        );
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let desc = Arc::clone(&desc);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let order: Vec<String> =
                        desc.ascending().map(|m| m.name().to_string()).collect();
                    (order, format_enum(&desc, 7))
                })
            })
            .collect();

        for handle in handles {
            let (order, formatted) = handle.join().unwrap();
            assert_eq!(order, vec!["a", "a2", "b", "c"]);
            assert_eq!(formatted, "a | b | c");
        }
    }
}
