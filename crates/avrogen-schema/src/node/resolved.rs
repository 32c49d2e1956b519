use crate::{
    node::{FieldDescriptor, declaration::full_name},
    types::{DeclaredType, WireType},
};

///
/// ResolvedRecord
///
/// A descriptor whose every field has a wire type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedRecord {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) fields: Vec<ResolvedField>,
}

impl ResolvedRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.name, self.namespace.as_deref())
    }

    #[must_use]
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, position: u32) -> Option<&ResolvedField> {
        self.fields
            .binary_search_by_key(&position, ResolvedField::position)
            .ok()
            .map(|i| &self.fields[i])
    }
}

///
/// ResolvedField
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedField {
    pub(crate) descriptor: FieldDescriptor,
    pub(crate) wire: WireType,
}

impl ResolvedField {
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.descriptor.position
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.descriptor.property
    }

    #[must_use]
    pub fn wire_name(&self) -> &str {
        &self.descriptor.wire_name
    }

    #[must_use]
    pub const fn declared(&self) -> &DeclaredType {
        &self.descriptor.declared
    }

    #[must_use]
    pub const fn wire(&self) -> WireType {
        self.wire
    }
}
