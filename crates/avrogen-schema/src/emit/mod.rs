pub mod accessor;
pub mod canonical;
pub mod definition;
pub mod dispatch;
pub mod schema;

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location},
    emit::{dispatch::DispatchTable, schema::SchemaDocument},
    node::ResolvedRecord,
};
use proc_macro2::TokenStream;
use syn::{Generics, Ident};

///
/// RecordArtifacts
///
/// Everything the emitters produce for one record. Holds no token streams,
/// so it can cross threads; tokens are rendered on demand.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordArtifacts {
    pub record: ResolvedRecord,
    pub document: SchemaDocument,
    pub schema_json: String,
    pub canonical_form: String,
    pub fingerprint: u64,
    pub dispatch: DispatchTable,
}

impl RecordArtifacts {
    #[must_use]
    pub fn accessor_tokens(&self, ident: &Ident, generics: &Generics) -> TokenStream {
        accessor::accessor_tokens(self, ident, generics)
    }

    pub fn definition_tokens(&self) -> syn::Result<TokenStream> {
        definition::definition_tokens(self)
    }
}

/// Schema document, canonical form and dispatch table for a resolved record.
/// The emitted JSON is parsed back before it is accepted.
pub(crate) fn emit_record(record: ResolvedRecord) -> Result<RecordArtifacts, Diagnostics> {
    let failed = |message: String| {
        Diagnostics::from(Diagnostic::new(
            DiagnosticKind::EmitFailed,
            Location::record(record.name()),
            message,
        ))
    };

    let document = SchemaDocument::from_record(&record);
    let schema_json = document.to_json().map_err(|e| failed(e.to_string()))?;
    let parsed = schema::parse_document(&schema_json).map_err(|e| failed(e.to_string()))?;

    let canonical_form = canonical::canonical_form(&parsed);
    let fingerprint = canonical::fingerprint64(canonical_form.as_bytes());
    let dispatch = DispatchTable::from_record(&record);

    tracing::debug!(
        record = %record.full_name(),
        fields = dispatch.len(),
        fingerprint = %format_args!("{fingerprint:016x}"),
        "record emitted"
    );

    Ok(RecordArtifacts {
        record,
        document,
        schema_json,
        canonical_form,
        fingerprint,
        dispatch,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{build::generate, node::*, types::DeclaredType};

    fn field(property: &str, ty: &str, marker: FieldMarker) -> DeclaredField {
        DeclaredField::new(property, DeclaredType::parse(ty).unwrap(), marker)
    }

    #[test]
    fn schema_lists_fields_in_position_order() {
        let decl = RecordDeclaration::new("Reading", Some("Fake.Namespace".into()))
            .with_field(field("running_hours", "i64", FieldMarker::at(3)))
            .with_field(field(
                "property_id",
                "Option<String>",
                FieldMarker::at(0).with_wire_name("PropertyID"),
            ))
            .with_field(field("gallons", "Option<f64>", FieldMarker::at(1)));

        let artifacts = generate(decl).unwrap();

        assert_eq!(
            artifacts.schema_json,
            r#"{"type":"record","name":"Reading","namespace":"Fake.Namespace","fields":[{"name":"PropertyID","type":["null","string"],"default":null},{"name":"gallons","type":["null","double"],"default":null},{"name":"running_hours","type":"long"}]}"#
        );
        assert_eq!(
            artifacts.canonical_form,
            r#"{"name":"Fake.Namespace.Reading","type":"record","fields":[{"name":"PropertyID","type":["null","string"]},{"name":"gallons","type":["null","double"]},{"name":"running_hours","type":"long"}]}"#
        );
    }

    #[test]
    fn emission_is_deterministic() {
        let decl = || {
            RecordDeclaration::new("Reading", None)
                .with_field(field("b", "bool", FieldMarker::at(2)))
                .with_field(field("a", "Vec<u8>", FieldMarker::at(0)))
        };

        let first = generate(decl()).unwrap();
        let second = generate(decl()).unwrap();

        assert_eq!(first.schema_json, second.schema_json);
        assert_eq!(first.fingerprint, second.fingerprint);
    }

    #[test]
    fn empty_namespace_is_omitted() {
        let artifacts = generate(RecordDeclaration::new("A", Some(String::new()))).unwrap();

        assert_eq!(artifacts.schema_json, r#"{"type":"record","name":"A","fields":[]}"#);
        assert_eq!(artifacts.fingerprint, 12_378_712_447_811_102_506);
    }
}
