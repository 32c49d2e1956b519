use crate::BuildError;
use avrogen_schema::{emit::RecordArtifacts, emit::schema::parse_document};

const HEADER: &str = "// @generated by avrogen-build. Do not edit.\n\n";

/// Struct definition plus accessors for one record, checked end to end:
/// the schema document is parsed back and the items must parse as Rust.
pub fn render_record(artifacts: &RecordArtifacts) -> Result<syn::File, BuildError> {
    let document = parse_document(&artifacts.schema_json)?;
    if document.fields.len() != artifacts.dispatch.len() {
        return Err(BuildError::FieldCount {
            record: artifacts.record.full_name(),
            schema: document.fields.len(),
            dispatch: artifacts.dispatch.len(),
        });
    }

    Ok(syn::parse2(artifacts.definition_tokens()?)?)
}

/// One formatted source file holding every record in order.
pub fn render_file<'a>(
    records: impl IntoIterator<Item = &'a RecordArtifacts>,
) -> Result<String, BuildError> {
    let mut file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: Vec::new(),
    };

    for artifacts in records {
        file.items.extend(render_record(artifacts)?.items);
    }

    Ok(format!("{HEADER}{}", prettyplease::unparse(&file)))
}

///
/// TESTS
///
