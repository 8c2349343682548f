//! Variable inspection for enum-typed values.
//!
//! Resolves enum type metadata once per type through a [`TypeResolver`],
//! caches the resulting descriptors for the session, and formats raw values
//! into protocol [`Variable`]s.

use std::collections::HashMap;
use std::sync::Arc;

use enumscope_config::{EnumDefinition, ProjectConfig};

use crate::debugger::protocol::Variable;
use crate::descriptor::{DescriptorError, EnumTypeDescriptor};
use crate::formatter::EnumFormatter;
use crate::value::RawEnumValue;

// ── TypeResolver ─────────────────────────────────────────────────────────────

/// Source of enum type metadata.
pub trait TypeResolver {
    /// Build the descriptor for `type_name`.
    fn resolve(&self, type_name: &str) -> Result<EnumTypeDescriptor, DescriptorError>;
}

impl<F> TypeResolver for F
where
    F: Fn(&str) -> Result<EnumTypeDescriptor, DescriptorError>,
{
    fn resolve(&self, type_name: &str) -> Result<EnumTypeDescriptor, DescriptorError> {
        self(type_name)
    }
}

// ── ConfigCatalog ────────────────────────────────────────────────────────────

/// Resolves types from `[[enum]]` tables of a project config.
#[derive(Debug, Clone, Default)]
pub struct ConfigCatalog {
    definitions: Vec<EnumDefinition>,
}

impl ConfigCatalog {
    pub fn new(definitions: Vec<EnumDefinition>) -> Self {
        Self { definitions }
    }

    pub fn from_project(project: &ProjectConfig) -> Self {
        Self::new(project.enums.clone())
    }

    /// Type names in file order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }
}

impl TypeResolver for ConfigCatalog {
    fn resolve(&self, type_name: &str) -> Result<EnumTypeDescriptor, DescriptorError> {
        let def = self
            .definitions
            .iter()
            .find(|d| d.name == type_name)
            .ok_or_else(|| DescriptorError::UnknownType(type_name.to_string()))?;
        EnumTypeDescriptor::try_from(def)
    }
}

// ── DescriptorCache ──────────────────────────────────────────────────────────

/// Per-session descriptor cache; each type is resolved at most once.
pub struct DescriptorCache<R> {
    resolver: R,
    descriptors: HashMap<String, Arc<EnumTypeDescriptor>>,
}

impl<R: TypeResolver> DescriptorCache<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            descriptors: HashMap::new(),
        }
    }

    /// Get the descriptor for `type_name`, resolving it on first use.
    ///
    /// Resolution failures are not cached.
    pub fn get(&mut self, type_name: &str) -> Result<Arc<EnumTypeDescriptor>, DescriptorError> {
        if let Some(desc) = self.descriptors.get(type_name) {
            return Ok(Arc::clone(desc));
        }
        let desc = Arc::new(self.resolver.resolve(type_name)?);
        tracing::debug!(
            type_name,
            members = desc.members().len(),
            flags = desc.is_bit_flags(),
            underlying = %desc.repr(),
            "resolved enum type"
        );
        self.descriptors.insert(type_name.to_string(), Arc::clone(&desc));
        Ok(desc)
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop all cached descriptors (e.g. after the debuggee reloads types).
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

// ── Inspector ────────────────────────────────────────────────────────────────

/// Formats enum-typed variables for protocol replies.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    formatter: EnumFormatter,
}

impl Inspector {
    pub fn new(formatter: EnumFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &EnumFormatter {
        &self.formatter
    }

    /// Build the protocol variable for a raw value of `descriptor`'s type.
    pub fn inspect(
        &self,
        name: &str,
        descriptor: &EnumTypeDescriptor,
        raw: RawEnumValue,
    ) -> Variable {
        Variable::new(
            name,
            self.formatter.format(descriptor, raw),
            descriptor.name(),
        )
    }

    /// Like [`Inspector::inspect`] for a numeric value.
    pub fn inspect_value(
        &self,
        name: &str,
        descriptor: &EnumTypeDescriptor,
        value: i128,
    ) -> Variable {
        Variable::new(
            name,
            self.formatter.format_value(descriptor, value),
            descriptor.name(),
        )
    }
}
