//! Coercions between temporal values and their logical wire encodings.
//!
//! `OffsetDateTime` covers years -9999..=9999, so every instant fits the
//! `long` millisecond/microsecond encodings and the `int` day encoding.

use crate::{types::LogicalType, value::Value};
use time::{Date, OffsetDateTime};

const SECONDS_PER_DAY: i64 = 86_400;
const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;

// --- instants ---------------------------------------------------------------

#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn instant_to_micros(instant: OffsetDateTime) -> i64 {
    instant.unix_timestamp_nanos().div_euclid(1_000) as i64
}

#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn instant_to_millis(instant: OffsetDateTime) -> i64 {
    instant.unix_timestamp_nanos().div_euclid(1_000_000) as i64
}

/// Calendar day (UTC) of an instant, as days since the epoch.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn instant_to_days(instant: OffsetDateTime) -> i32 {
    instant.unix_timestamp().div_euclid(SECONDS_PER_DAY) as i32
}

#[must_use]
pub fn micros_to_instant(micros: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1_000).ok()
}

#[must_use]
pub fn millis_to_instant(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

/// Midnight UTC of the given day.
#[must_use]
pub fn days_to_instant(days: i32) -> Option<OffsetDateTime> {
    Some(days_to_date(days)?.midnight().assume_utc())
}

// --- dates ------------------------------------------------------------------

#[must_use]
pub const fn date_to_days(date: Date) -> i32 {
    date.to_julian_day() - UNIX_EPOCH_JULIAN_DAY
}

#[must_use]
pub fn days_to_date(days: i32) -> Option<Date> {
    Date::from_julian_day(UNIX_EPOCH_JULIAN_DAY.checked_add(days)?).ok()
}

// --- values -----------------------------------------------------------------

/// Inverse coercion: instant → integer since epoch, tagged with `logical`.
#[must_use]
pub fn instant_to_value(instant: OffsetDateTime, logical: LogicalType) -> Value {
    match logical {
        LogicalType::Date => Value::Date(instant_to_days(instant)),
        LogicalType::TimestampMicros => Value::TimestampMicros(instant_to_micros(instant)),
        LogicalType::TimestampMillis => Value::TimestampMillis(instant_to_millis(instant)),
    }
}

/// Forward coercion: integer since epoch → instant.
///
/// Accepts the tagged logical value or its untagged underlying primitive.
#[must_use]
pub fn instant_from_value(value: Value, logical: LogicalType) -> Option<OffsetDateTime> {
    match value.with_logical(logical)? {
        Value::Date(days) => days_to_instant(days),
        Value::TimestampMicros(micros) => micros_to_instant(micros),
        Value::TimestampMillis(millis) => millis_to_instant(millis),
        _ => None,
    }
}

#[must_use]
pub fn date_to_value(date: Date, logical: LogicalType) -> Value {
    match logical {
        LogicalType::Date => Value::Date(date_to_days(date)),
        LogicalType::TimestampMicros | LogicalType::TimestampMillis => {
            instant_to_value(date.midnight().assume_utc(), logical)
        }
    }
}

#[must_use]
pub fn date_from_value(value: Value, logical: LogicalType) -> Option<Date> {
    match logical {
        LogicalType::Date => match value.with_logical(logical)? {
            Value::Date(days) => days_to_date(days),
            _ => None,
        },
        LogicalType::TimestampMicros | LogicalType::TimestampMillis => {
            instant_from_value(value, logical).map(OffsetDateTime::date)
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::{Month, UtcOffset};

    fn may_8_2021() -> Date {
        Date::from_calendar_date(2021, Month::May, 8).expect("valid date")
    }

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(days_to_date(0), Some(Date::from_julian_day(2_440_588).unwrap()));
        assert_eq!(date_to_days(OffsetDateTime::UNIX_EPOCH.date()), 0);
        assert_eq!(instant_to_micros(OffsetDateTime::UNIX_EPOCH), 0);
    }

    #[test]
    fn calendar_date_survives_date_encoding() {
        let instant = may_8_2021().midnight().assume_utc();
        let value = instant_to_value(instant, LogicalType::Date);

        assert_eq!(value, Value::Date(18_755));
        assert_eq!(instant_from_value(value, LogicalType::Date), Some(instant));
    }

    #[test]
    fn date_encoding_truncates_time_of_day_in_utc() {
        let instant = may_8_2021()
            .with_hms(23, 30, 0)
            .unwrap()
            .assume_offset(UtcOffset::from_hms(-2, 0, 0).unwrap());

        // 23:30 at UTC-2 is already May 9th in UTC.
        assert_eq!(instant_to_days(instant), date_to_days(may_8_2021()) + 1);
    }

    #[test]
    fn pre_epoch_instants_round_down() {
        let instant = OffsetDateTime::UNIX_EPOCH - time::Duration::nanoseconds(1);

        assert_eq!(instant_to_micros(instant), -1);
        assert_eq!(instant_to_millis(instant), -1);
        assert_eq!(instant_to_days(instant), -1);
    }

    #[test]
    fn untagged_primitives_are_accepted_for_forward_coercion() {
        assert_eq!(
            instant_from_value(Value::Long(1_000_000), LogicalType::TimestampMicros),
            Some(OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(1))
        );
        assert_eq!(
            date_from_value(Value::Int(1), LogicalType::Date),
            days_to_date(1)
        );
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        assert_eq!(instant_from_value(Value::Int(1), LogicalType::TimestampMicros), None);
        assert_eq!(
            instant_from_value(Value::TimestampMillis(1), LogicalType::TimestampMicros),
            None
        );
        assert_eq!(date_from_value(Value::String("2021-05-08".into()), LogicalType::Date), None);
    }

    #[test]
    fn out_of_range_encodings_are_rejected() {
        assert_eq!(micros_to_instant(i64::MAX), None);
        assert_eq!(days_to_date(i32::MAX), None);
    }

    proptest! {
        #[test]
        fn micros_roundtrip(micros in -253_402_300_799_000_000i64..=253_402_300_799_000_000i64) {
            let instant = micros_to_instant(micros).expect("in range");
            prop_assert_eq!(instant_to_micros(instant), micros);
        }

        #[test]
        fn days_roundtrip(days in -3_652_059i32..=2_932_896i32) {
            let date = days_to_date(days).expect("in range");
            prop_assert_eq!(date_to_days(date), days);
        }
    }
}
