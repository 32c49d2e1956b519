mod field_value;
mod logical_value;

use crate::{error::AccessError, model::RecordModel, types::LogicalType, value::Value};

// ============================================================================
// INDEXED RECORD
// ============================================================================

///
/// IndexedRecord
///
/// Position-addressed access to a record's fields.
///
/// `position` is the key shared by the schema document and the dispatch
/// table: the field at position `n` in `MODEL` is the field written by
/// `put(n, ..)` and the field emitted at that slot in `SCHEMA_JSON`.
///

pub trait IndexedRecord {
    /// Avro schema document describing this record.
    const SCHEMA_JSON: &'static str;

    /// Static field metadata, ordered by position.
    const MODEL: &'static RecordModel;

    /// Read the field at `position`, applying inverse logical coercion.
    fn get(&self, position: usize) -> Result<Value, AccessError>;

    /// Write the field at `position`, applying forward logical coercion.
    /// On error the record is left unchanged.
    fn put(&mut self, position: usize, value: Value) -> Result<(), AccessError>;
}

// ============================================================================
// FIELD CONVERSIONS
// ============================================================================

///
/// FieldValue
///
/// Direct conversion between a field type and its `Value`.
///

pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;

    /// Returns `None` when `value` does not have this type's wire shape.
    fn from_value(value: Value) -> Option<Self>;
}

///
/// LogicalValue
///
/// Conversion through a logical annotation (e.g. instant ↔ micros since epoch).
///

pub trait LogicalValue: Sized {
    fn to_logical_value(&self, logical: LogicalType) -> Value;

    fn from_logical_value(value: Value, logical: LogicalType) -> Option<Self>;
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

/// Convert `value` and store it in `slot`.
/// Returns `false` and leaves `slot` untouched when the shape does not match.
pub fn assign_field<T: FieldValue>(slot: &mut T, value: Value) -> bool {
    match T::from_value(value) {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Logical counterpart of [`assign_field`].
pub fn assign_logical<T: LogicalValue>(slot: &mut T, value: Value, logical: LogicalType) -> bool {
    match T::from_logical_value(value, logical) {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}
