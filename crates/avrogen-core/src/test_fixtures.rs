//! Hand-expanded accessor fixture, shaped like derive output.

use crate::{
    error::AccessError,
    model::{FieldModel, RecordModel},
    traits::{FieldValue, IndexedRecord, LogicalValue, assign_field, assign_logical},
    types::{LogicalType, Primitive},
    value::Value,
};
use time::OffsetDateTime;

#[derive(Debug, Default, PartialEq)]
pub(crate) struct Reading {
    pub(crate) property_id: Option<String>,
    pub(crate) gallons: Option<f64>,
    pub(crate) running_hours: i64,
    pub(crate) hour: Option<OffsetDateTime>,
}

static READING_FIELDS: [FieldModel; 4] = [
    FieldModel {
        position: 0,
        name: "PropertyID",
        property: "property_id",
        primitive: Primitive::String,
        logical: None,
        nullable: true,
    },
    FieldModel {
        position: 1,
        name: "Gallons",
        property: "gallons",
        primitive: Primitive::Double,
        logical: None,
        nullable: true,
    },
    FieldModel {
        position: 3,
        name: "Running_hours",
        property: "running_hours",
        primitive: Primitive::Long,
        logical: None,
        nullable: false,
    },
    FieldModel {
        position: 4,
        name: "hour",
        property: "hour",
        primitive: Primitive::Long,
        logical: Some(LogicalType::TimestampMicros),
        nullable: true,
    },
];

static READING_MODEL: RecordModel = RecordModel {
    name: "Reading",
    namespace: Some("Fake.Namespace"),
    fields: &READING_FIELDS,
    fingerprint: 0,
};

impl IndexedRecord for Reading {
    const SCHEMA_JSON: &'static str = "";
    const MODEL: &'static RecordModel = &READING_MODEL;

    fn get(&self, position: usize) -> Result<Value, AccessError> {
        match position {
            0 => Ok(FieldValue::to_value(&self.property_id)),
            1 => Ok(FieldValue::to_value(&self.gallons)),
            3 => Ok(FieldValue::to_value(&self.running_hours)),
            4 => Ok(LogicalValue::to_logical_value(
                &self.hour,
                LogicalType::TimestampMicros,
            )),
            _ => Err(AccessError::out_of_range("Reading", position)),
        }
    }

    fn put(&mut self, position: usize, value: Value) -> Result<(), AccessError> {
        let found = value.kind();

        match position {
            0 => {
                if !assign_field(&mut self.property_id, value) {
                    return Err(AccessError::type_mismatch(
                        "Reading",
                        "PropertyID",
                        0,
                        "[null, string]",
                        found,
                    ));
                }
            }
            1 => {
                if !assign_field(&mut self.gallons, value) {
                    return Err(AccessError::type_mismatch(
                        "Reading",
                        "Gallons",
                        1,
                        "[null, double]",
                        found,
                    ));
                }
            }
            3 => {
                if !assign_field(&mut self.running_hours, value) {
                    return Err(AccessError::type_mismatch(
                        "Reading",
                        "Running_hours",
                        3,
                        "long",
                        found,
                    ));
                }
            }
            4 => {
                if !assign_logical(&mut self.hour, value, LogicalType::TimestampMicros) {
                    return Err(AccessError::type_mismatch(
                        "Reading",
                        "hour",
                        4,
                        "[null, long(timestamp-micros)]",
                        found,
                    ));
                }
            }
            _ => return Err(AccessError::out_of_range("Reading", position)),
        }

        Ok(())
    }
}
