use crate::{node::FieldMarker, types::DeclaredType};

///
/// RecordDeclaration
///
/// A scanned record: the marked fields in source order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordDeclaration {
    pub name: String,
    pub namespace: Option<String>,
    pub fields: Vec<DeclaredField>,
}

impl RecordDeclaration {
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: DeclaredField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: DeclaredField) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.name, self.namespace.as_deref())
    }
}

///
/// DeclaredField
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclaredField {
    /// Rust field name.
    pub property: String,
    pub declared: DeclaredType,
    pub marker: FieldMarker,
}

impl DeclaredField {
    pub fn new(property: impl Into<String>, declared: DeclaredType, marker: FieldMarker) -> Self {
        Self {
            property: property.into(),
            declared,
            marker,
        }
    }
}

pub(crate) fn full_name(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}
