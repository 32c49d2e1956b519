use crate::types::{LogicalType, Primitive};

///
/// RecordModel
/// Static record metadata emitted beside the accessor implementation.
///

#[derive(Debug)]
pub struct RecordModel {
    /// Record name as written in the schema document.
    pub name: &'static str,
    pub namespace: Option<&'static str>,
    /// Fields in ascending position order.
    pub fields: &'static [FieldModel],
    /// CRC-64-AVRO fingerprint of the schema's parsing canonical form.
    pub fingerprint: u64,
}

impl RecordModel {
    /// Namespace-qualified record name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.to_string(),
        }
    }

    #[must_use]
    pub fn field(&self, position: usize) -> Option<&FieldModel> {
        self.fields
            .binary_search_by_key(&position, |f| f.position)
            .ok()
            .map(|i| &self.fields[i])
    }

    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// FieldModel
///

#[derive(Debug)]
pub struct FieldModel {
    pub position: usize,
    /// Wire name used in the schema document.
    pub name: &'static str,
    /// Rust field the accessor binds to.
    pub property: &'static str,
    pub primitive: Primitive,
    pub logical: Option<LogicalType>,
    pub nullable: bool,
}

///
/// TESTS
///
