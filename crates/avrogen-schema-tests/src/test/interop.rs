//! Emitted schemas checked against the Apache Avro reference parser.

use crate::{
    prelude::*,
    test::{
        generated::{Heartbeat, LeakAlert},
        meter_reading::MeterReadingEntry,
        shapes::{Calibration, Empty},
    },
};
use apache_avro::{Schema, rabin::Rabin};

fn schemas() -> [(&'static str, &'static str, u64); 5] {
    [
        (
            "MeterReadingEntry",
            MeterReadingEntry::SCHEMA_JSON,
            MeterReadingEntry::SCHEMA_FINGERPRINT,
        ),
        ("Calibration", Calibration::SCHEMA_JSON, Calibration::SCHEMA_FINGERPRINT),
        ("Empty", Empty::SCHEMA_JSON, Empty::SCHEMA_FINGERPRINT),
        ("LeakAlert", LeakAlert::SCHEMA_JSON, LeakAlert::SCHEMA_FINGERPRINT),
        ("Heartbeat", Heartbeat::SCHEMA_JSON, Heartbeat::SCHEMA_FINGERPRINT),
    ]
}

#[test]
fn reference_parser_accepts_every_schema() {
    for (record, json, _) in schemas() {
        let parsed = Schema::parse_str(json);
        assert!(parsed.is_ok(), "{record}: {parsed:?}");
    }
}

#[test]
fn reference_fingerprints_agree() {
    for (record, json, fingerprint) in schemas() {
        let schema = Schema::parse_str(json).unwrap();
        let bytes: [u8; 8] = schema.fingerprint::<Rabin>().bytes.try_into().unwrap();

        assert_eq!(u64::from_le_bytes(bytes), fingerprint, "{record}");
    }
}

#[test]
fn reference_parser_sees_every_field() {
    let Schema::Record(record) = Schema::parse_str(MeterReadingEntry::SCHEMA_JSON).unwrap() else {
        panic!("expected a record schema");
    };

    assert_eq!(record.fields.len(), MeterReadingEntry::MODEL.len());
    for (field, model) in record.fields.iter().zip(MeterReadingEntry::MODEL.fields) {
        assert_eq!(field.name, model.name);
    }
}
