use crate::{node::declaration::full_name, types::DeclaredType};

///
/// RecordDescriptor
///
/// Validated, position-sorted view of a declaration. Built once per record
/// and immutable afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordDescriptor {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
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

    /// Fields in strictly ascending position order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub(crate) position: u32,
    pub(crate) property: String,
    pub(crate) wire_name: String,
    pub(crate) declared: DeclaredType,
    pub(crate) underlying: Option<String>,
    pub(crate) logical: Option<String>,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Name written to the schema document.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    #[must_use]
    pub const fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    #[must_use]
    pub fn underlying(&self) -> Option<&str> {
        self.underlying.as_deref()
    }

    #[must_use]
    pub fn logical(&self) -> Option<&str> {
        self.logical.as_deref()
    }
}
