use crate::{logical, traits::LogicalValue, types::LogicalType, value::Value};
use time::{Date, OffsetDateTime};

impl LogicalValue for OffsetDateTime {
    fn to_logical_value(&self, logical: LogicalType) -> Value {
        logical::instant_to_value(*self, logical)
    }

    fn from_logical_value(value: Value, logical: LogicalType) -> Option<Self> {
        logical::instant_from_value(value, logical)
    }
}

impl LogicalValue for Date {
    fn to_logical_value(&self, logical: LogicalType) -> Value {
        logical::date_to_value(*self, logical)
    }

    fn from_logical_value(value: Value, logical: LogicalType) -> Option<Self> {
        logical::date_from_value(value, logical)
    }
}

impl<T: LogicalValue> LogicalValue for Option<T> {
    fn to_logical_value(&self, logical: LogicalType) -> Value {
        self.as_ref()
            .map_or(Value::Null, |inner| inner.to_logical_value(logical))
    }

    fn from_logical_value(value: Value, logical: LogicalType) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_logical_value(other, logical).map(Some),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn optional_instant_roundtrips_null() {
        let value = None::<OffsetDateTime>.to_logical_value(LogicalType::TimestampMicros);

        assert_eq!(value, Value::Null);
        assert_eq!(
            Option::<OffsetDateTime>::from_logical_value(value, LogicalType::TimestampMicros),
            Some(None)
        );
    }

    #[test]
    fn date_field_uses_day_encoding() {
        let date = Date::from_calendar_date(2021, Month::May, 8).unwrap();

        assert_eq!(date.to_logical_value(LogicalType::Date), Value::Date(18_755));
        assert_eq!(
            Date::from_logical_value(Value::Date(18_755), LogicalType::Date),
            Some(date)
        );
    }
}
