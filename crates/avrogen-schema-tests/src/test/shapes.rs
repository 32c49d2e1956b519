use crate::prelude::*;

///
/// Calibration
///
/// Every primitive the derive maps without overrides, plus required
/// temporal fields and a raw identifier.
///

#[derive(AvroRecord, Clone, Debug, PartialEq)]
#[avro_record(name = "MeterCalibration", namespace = "Fake.Namespace.Devices")]
pub struct Calibration {
    #[avro(position = 0)]
    pub r#type: String,

    #[avro(position = 1)]
    pub enabled: bool,

    #[avro(position = 2)]
    pub channel: i32,

    #[avro(position = 3)]
    pub offset: f32,

    #[avro(position = 4)]
    pub blob: Vec<u8>,

    #[avro(position = 5, underlying = "long", logical = "timestamp-millis")]
    pub calibrated_at: OffsetDateTime,

    #[avro(position = 6, underlying = "int", logical = "date")]
    pub due: Date,

    pub notes: Vec<String>,
}

impl Calibration {
    #[must_use]
    pub fn sample() -> Self {
        Self {
            r#type: "flow".to_string(),
            enabled: true,
            channel: 2,
            offset: 0.25,
            blob: vec![1, 2, 3],
            calibrated_at: OffsetDateTime::UNIX_EPOCH,
            due: OffsetDateTime::UNIX_EPOCH.date(),
            notes: Vec::new(),
        }
    }
}

///
/// Empty
///

#[derive(AvroRecord, Debug, Default)]
pub struct Empty {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_name_override_replaces_the_ident() {
        assert_eq!(
            Calibration::MODEL.full_name(),
            "Fake.Namespace.Devices.MeterCalibration"
        );
        assert!(Calibration::SCHEMA_JSON.starts_with(
            r#"{"type":"record","name":"MeterCalibration","namespace":"Fake.Namespace.Devices""#
        ));
    }

    #[test]
    fn raw_identifiers_are_written_without_prefix() {
        let mut c = Calibration::sample();

        assert!(Calibration::SCHEMA_JSON.contains(r#"{"name":"type","type":"string"}"#));

        c.put(0, Value::from("pressure")).unwrap();
        assert_eq!(c.r#type, "pressure");
    }

    #[test]
    fn required_fields_reject_null() {
        let mut c = Calibration::sample();

        for position in 0..7 {
            assert!(c.put(position, Value::Null).is_err(), "position {position}");
        }
        assert_eq!(c, Calibration::sample());
    }

    #[test]
    fn primitives_roundtrip() {
        let mut c = Calibration::sample();

        c.put(1, Value::Boolean(false)).unwrap();
        c.put(2, Value::Int(-4)).unwrap();
        c.put(3, Value::Float(1.5)).unwrap();
        c.put(4, Value::Bytes(vec![9])).unwrap();

        assert_eq!(c.get(1), Ok(Value::Boolean(false)));
        assert_eq!(c.get(2), Ok(Value::Int(-4)));
        assert_eq!(c.get(3), Ok(Value::Float(1.5)));
        assert_eq!(c.get(4), Ok(Value::Bytes(vec![9])));
    }

    #[test]
    fn int_and_long_are_not_interchangeable() {
        let mut c = Calibration::sample();

        assert!(c.put(2, Value::Long(1)).is_err());
        assert_eq!(c.channel, 2);
    }

    #[test]
    fn millis_timestamps_drop_sub_millisecond_precision() {
        let mut c = Calibration::sample();

        c.put(5, Value::TimestampMillis(1_500)).unwrap();

        assert_eq!(c.calibrated_at.unix_timestamp_nanos(), 1_500_000_000);
        assert_eq!(c.get(5), Ok(Value::TimestampMillis(1_500)));
    }

    #[test]
    fn required_date_uses_day_numbers() {
        let mut c = Calibration::sample();

        c.put(6, Value::Int(18_755)).unwrap();

        assert_eq!(c.due.to_string(), "2021-05-08");
        assert_eq!(c.get(6), Ok(Value::Date(18_755)));
    }

    #[test]
    fn unmarked_fields_are_skipped() {
        assert_eq!(Calibration::MODEL.len(), 7);
        assert!(Calibration::MODEL.field_by_name("notes").is_none());
        assert!(Calibration::sample().get(7).is_err());
    }

    #[test]
    fn empty_records_have_no_positions() {
        let mut e = Empty::default();

        assert_eq!(
            Empty::SCHEMA_JSON,
            r#"{"type":"record","name":"Empty","fields":[]}"#
        );
        assert_eq!(Empty::SCHEMA_FINGERPRINT, 1_515_856_710_679_496_244);
        assert_eq!(e.get(0), Err(AccessError::out_of_range("Empty", 0)));
        assert_eq!(e.put(0, Value::Null), Err(AccessError::out_of_range("Empty", 0)));
    }
}
