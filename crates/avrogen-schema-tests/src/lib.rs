//! Fixture records exercising both generation paths: `#[derive(AvroRecord)]`
//! on hand-written structs and `build!` over descriptor tables.

pub mod test;

pub mod prelude {
    pub use avrogen::prelude::*;
    pub use time::{Date, OffsetDateTime};
}
