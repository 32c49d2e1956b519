use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// UnknownTypeName
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown {family} type name '{name}'")]
pub struct UnknownTypeName {
    pub family: &'static str,
    pub name: String,
}

///
/// Primitive
///
/// Avro primitive wire types.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum Primitive {
    Boolean,
    Bytes,
    Double,
    Float,
    Int,
    Long,
    Null,
    String,
}

impl Primitive {
    pub const ALL: [Self; 8] = [
        Self::Null,
        Self::Boolean,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Bytes,
        Self::String,
    ];

    /// Name used in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Bytes => "bytes",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Null => "null",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownTypeName {
                family: "primitive",
                name: s.to_string(),
            })
    }
}

///
/// LogicalType
///
/// Annotation layered on a primitive telling readers how to reinterpret it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum LogicalType {
    /// `int` days since the Unix epoch.
    Date,
    /// `long` microseconds since the Unix epoch.
    TimestampMicros,
    /// `long` milliseconds since the Unix epoch.
    TimestampMillis,
}

impl LogicalType {
    pub const ALL: [Self; 3] = [Self::Date, Self::TimestampMillis, Self::TimestampMicros];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::TimestampMicros => "timestamp-micros",
            Self::TimestampMillis => "timestamp-millis",
        }
    }

    /// The only primitive this annotation may be layered on.
    #[must_use]
    pub const fn underlying(self) -> Primitive {
        match self {
            Self::Date => Primitive::Int,
            Self::TimestampMicros | Self::TimestampMillis => Primitive::Long,
        }
    }

    #[must_use]
    pub const fn is_date_only(self) -> bool {
        matches!(self, Self::Date)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownTypeName {
                family: "logical",
                name: s.to_string(),
            })
    }
}

///
/// TESTS
///
