mod tag;


use crate::types::{LogicalType, Primitive};

// re-exports
pub use tag::ValueKind;

///
/// Value
///
/// Dynamic field value exchanged between generated accessors and a
/// serialization runtime.
///
/// Null             → the field's value is `Option::None`.
/// Date / Timestamp → logical values, carried as their integer encoding.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    /// Days since the Unix epoch.
    Date(i32),
    /// Milliseconds since the Unix epoch.
    TimestampMillis(i64),
    /// Microseconds since the Unix epoch.
    TimestampMicros(i64),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::TimestampMillis(_) => ValueKind::TimestampMillis,
            Self::TimestampMicros(_) => ValueKind::TimestampMicros,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The primitive this value is encoded as on the wire.
    #[must_use]
    pub const fn primitive(&self) -> Primitive {
        match self {
            Self::Null => Primitive::Null,
            Self::Boolean(_) => Primitive::Boolean,
            Self::Int(_) | Self::Date(_) => Primitive::Int,
            Self::Long(_) | Self::TimestampMillis(_) | Self::TimestampMicros(_) => Primitive::Long,
            Self::Float(_) => Primitive::Float,
            Self::Double(_) => Primitive::Double,
            Self::Bytes(_) => Primitive::Bytes,
            Self::String(_) => Primitive::String,
        }
    }

    /// The logical annotation carried by this value, if any.
    #[must_use]
    pub const fn logical(&self) -> Option<LogicalType> {
        match self {
            Self::Date(_) => Some(LogicalType::Date),
            Self::TimestampMillis(_) => Some(LogicalType::TimestampMillis),
            Self::TimestampMicros(_) => Some(LogicalType::TimestampMicros),
            _ => None,
        }
    }

    /// Tag an integer-since-epoch with a logical annotation.
    ///
    /// Returns `None` when the value is not the annotation's underlying
    /// primitive (or already carries a different annotation).
    #[must_use]
    pub fn with_logical(self, logical: LogicalType) -> Option<Self> {
        match (logical, self) {
            (LogicalType::Date, Self::Int(v) | Self::Date(v)) => Some(Self::Date(v)),
            (LogicalType::TimestampMillis, Self::Long(v) | Self::TimestampMillis(v)) => {
                Some(Self::TimestampMillis(v))
            }
            (LogicalType::TimestampMicros, Self::Long(v) | Self::TimestampMicros(v)) => {
                Some(Self::TimestampMicros(v))
            }
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

macro_rules! impl_value_from {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Boolean,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Bytes,
    String => String,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
