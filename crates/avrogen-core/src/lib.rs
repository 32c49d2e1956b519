//! Runtime support for avrogen records: the dynamic `Value` exchanged with a
//! serialization runtime, the `IndexedRecord` capability generated code
//! implements, logical-type coercions, and static record metadata.
#![warn(unreachable_pub)]

pub mod error;
pub mod logical;
pub mod model;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{FieldModel, RecordModel},
        traits::{FieldValue, IndexedRecord, LogicalValue},
        types::{LogicalType, Primitive},
        value::Value,
    };
}
