use crate::{
    is_avro_name, is_avro_namespace,
    node::{ResolvedField, ResolvedRecord, full_name},
    types::{LogicalType, Primitive},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("schema document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema document: {0}")]
    Document(String),

    #[error("schema field '{field}': {message}")]
    Field { field: String, message: String },
}

impl SchemaError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

///
/// SchemaDocument
///
/// Serde model of a record schema. Field order in the struct is the key
/// order in the emitted JSON, so output is byte-for-byte deterministic.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub fields: Vec<SchemaField>,
}

///
/// SchemaField
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// `Some(Null)` for `"default": null`, `None` when the key is absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub default: Option<JsonValue>,
}

///
/// FieldType
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldType {
    Union(Vec<TypeRef>),
    Single(TypeRef),
}

impl FieldType {
    #[must_use]
    pub fn branches(&self) -> &[TypeRef] {
        match self {
            Self::Union(branches) => branches,
            Self::Single(single) => std::slice::from_ref(single),
        }
    }
}

///
/// TypeRef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Annotated(AnnotatedType),
}

impl TypeRef {
    #[must_use]
    pub fn primitive_name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Annotated(a) => &a.primitive,
        }
    }
}

///
/// AnnotatedType
///
/// `{"type": "long", "logicalType": "timestamp-micros"}`
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotatedType {
    #[serde(rename = "type")]
    pub primitive: String,
    #[serde(rename = "logicalType")]
    pub logical_type: String,
}

// present
// keeps an explicit `null` distinct from a missing key
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(d).map(Some)
}

impl SchemaDocument {
    #[must_use]
    pub fn from_record(record: &ResolvedRecord) -> Self {
        Self {
            kind: "record".to_string(),
            name: record.name().to_string(),
            namespace: record
                .namespace()
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            fields: record.fields().iter().map(SchemaField::from_resolved).collect(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.name, self.namespace.as_deref())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the document against the record grammar this crate emits.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.kind != "record" {
            return Err(SchemaError::Document(format!(
                "expected type 'record', found '{}'",
                self.kind
            )));
        }
        if !is_avro_name(&self.name) {
            return Err(SchemaError::Document(format!(
                "invalid record name '{}'",
                self.name
            )));
        }
        if let Some(ns) = &self.namespace
            && !is_avro_namespace(ns)
        {
            return Err(SchemaError::Document(format!("invalid namespace '{ns}'")));
        }

        let mut names = BTreeSet::new();
        for field in &self.fields {
            if !is_avro_name(&field.name) {
                return Err(SchemaError::field(&field.name, "invalid field name"));
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::field(&field.name, "duplicate field name"));
            }
            field.validate()?;
        }

        Ok(())
    }
}

impl SchemaField {
    fn from_resolved(field: &ResolvedField) -> Self {
        let wire = field.wire();
        let base = match wire.logical {
            Some(logical) => TypeRef::Annotated(AnnotatedType {
                primitive: wire.primitive.to_string(),
                logical_type: logical.to_string(),
            }),
            None => TypeRef::Name(wire.primitive.to_string()),
        };

        if wire.nullable {
            Self {
                name: field.wire_name().to_string(),
                ty: FieldType::Union(vec![TypeRef::Name(Primitive::Null.to_string()), base]),
                default: Some(JsonValue::Null),
            }
        } else {
            Self {
                name: field.wire_name().to_string(),
                ty: FieldType::Single(base),
                default: None,
            }
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let branches = self.ty.branches();
        if let FieldType::Union(_) = self.ty
            && branches.len() < 2
        {
            return Err(SchemaError::field(&self.name, "union needs at least two branches"));
        }

        let mut seen = BTreeSet::new();
        let mut first = None;
        for branch in branches {
            let primitive = validate_type_ref(&self.name, branch)?;
            if !seen.insert(primitive) {
                return Err(SchemaError::field(
                    &self.name,
                    format!("union repeats branch '{primitive}'"),
                ));
            }
            first.get_or_insert(primitive);
        }

        if let (Some(default), Some(first)) = (&self.default, first)
            && !default_matches(first, default)
        {
            return Err(SchemaError::field(
                &self.name,
                format!("default {default} does not match the first type '{first}'"),
            ));
        }

        Ok(())
    }
}

fn validate_type_ref(field: &str, ty: &TypeRef) -> Result<Primitive, SchemaError> {
    let primitive = ty
        .primitive_name()
        .parse::<Primitive>()
        .map_err(|e| SchemaError::field(field, e.to_string()))?;

    if let TypeRef::Annotated(a) = ty {
        let logical = a
            .logical_type
            .parse::<LogicalType>()
            .map_err(|e| SchemaError::field(field, e.to_string()))?;
        if logical.underlying() != primitive {
            return Err(SchemaError::field(
                field,
                format!("logical type '{logical}' cannot annotate '{primitive}'"),
            ));
        }
    }

    Ok(primitive)
}

fn default_matches(primitive: Primitive, value: &JsonValue) -> bool {
    match (primitive, value) {
        (Primitive::Null, JsonValue::Null)
        | (Primitive::Boolean, JsonValue::Bool(_))
        | (Primitive::String | Primitive::Bytes, JsonValue::String(_))
        | (Primitive::Float | Primitive::Double, JsonValue::Number(_)) => true,
        (Primitive::Int | Primitive::Long, JsonValue::Number(n)) => n.is_i64(),
        _ => false,
    }
}

/// Parse and validate a schema document.
pub fn parse_document(json: &str) -> Result<SchemaDocument, SchemaError> {
    let document: SchemaDocument = serde_json::from_str(json)?;
    document.validate()?;

    Ok(document)
}

///
/// TESTS
///
