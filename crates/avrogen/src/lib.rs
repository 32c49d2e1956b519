//! ## Crate layout
//! - `build`: build-script generation from TOML descriptor tables.
//! - `error`, `model`, `traits`, `types`, `value`: runtime surface used by
//!   generated accessors.
//! - `logical`: instant/date conversions behind logical types.
//! - `schema`: declarations, the generation pipeline, and the emitters.
//!
//! `#[derive(AvroRecord)]` and `build!` are the two ways to produce records.

pub use avrogen_build as build;
pub use avrogen_core::{error, logical, model, traits, types, value};
pub use avrogen_schema as schema;

// export so the derive resolves inside this crate's tests
extern crate self as avrogen;

/// re-exports
///
/// generated code names these through `::avrogen`, so callers do not have to
/// depend on them directly
pub mod __reexports {
    pub use time;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use avrogen_build::build;
pub use avrogen_derive::AvroRecord;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        AvroRecord,
        error::AccessError,
        traits::{FieldValue as _, IndexedRecord, LogicalValue as _},
        types::{LogicalType, Primitive},
        value::Value,
    };
}

///
/// TESTS
///
