use crate::value::ValueKind;
use thiserror::Error as ThisError;

///
/// AccessError
///
/// Failure of a single `IndexedRecord::get` / `IndexedRecord::put` call.
/// A failed call never modifies the record.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AccessError {
    #[error("record '{record}' has no field at position {position}")]
    OutOfRange {
        record: &'static str,
        position: usize,
    },

    #[error(
        "field '{field}' (position {position}) of record '{record}' expects {expected}, found {found}"
    )]
    TypeMismatch {
        record: &'static str,
        field: &'static str,
        position: usize,
        expected: &'static str,
        found: ValueKind,
    },
}

impl AccessError {
    #[must_use]
    pub const fn out_of_range(record: &'static str, position: usize) -> Self {
        Self::OutOfRange { record, position }
    }

    #[must_use]
    pub const fn type_mismatch(
        record: &'static str,
        field: &'static str,
        position: usize,
        expected: &'static str,
        found: ValueKind,
    ) -> Self {
        Self::TypeMismatch {
            record,
            field,
            position,
            expected,
            found,
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::OutOfRange { position, .. } | Self::TypeMismatch { position, .. } => *position,
        }
    }
}
