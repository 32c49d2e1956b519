//! Record declarations, the generation pipeline, and the emitters that turn a
//! resolved record into an Avro schema document and `IndexedRecord` tokens.

pub mod build;
pub mod diagnostic;
pub mod emit;
pub mod node;
pub mod types;

use crate::{build::GenerationFailure, emit::schema::SchemaError};
use thiserror::Error as ThisError;

/// Regex-free check of the Avro name grammar `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_avro_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dot-separated Avro names; the empty namespace is allowed.
#[must_use]
pub fn is_avro_namespace(namespace: &str) -> bool {
    namespace.is_empty() || namespace.split('.').all(is_avro_name)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{PipelineState, Stage},
        diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, Location},
        emit::RecordArtifacts,
        node::{
            DeclaredField, FieldDescriptor, FieldMarker, RecordDeclaration, RecordDescriptor,
            ResolvedField, ResolvedRecord,
        },
        types::{DeclaredKind, DeclaredType, LogicalType, Primitive, WireType},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    GenerationFailure(#[from] GenerationFailure),

    #[error(transparent)]
    SchemaError(#[from] SchemaError),
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avro_names_follow_the_identifier_grammar() {
        assert!(is_avro_name("PropertyID"));
        assert!(is_avro_name("_private"));
        assert!(is_avro_name("Running_hours"));
        assert!(!is_avro_name(""));
        assert!(!is_avro_name("9lives"));
        assert!(!is_avro_name("has-dash"));
        assert!(!is_avro_name("dotted.name"));
    }

    #[test]
    fn namespaces_are_dotted_names() {
        assert!(is_avro_namespace(""));
        assert!(is_avro_namespace("Fake.Namespace"));
        assert!(!is_avro_namespace("Fake..Namespace"));
        assert!(!is_avro_namespace(".Fake"));
    }
}
