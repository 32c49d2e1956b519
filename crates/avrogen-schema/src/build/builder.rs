use crate::{
    diagnostic::{Diagnostic, Diagnostics, Location},
    is_avro_name, is_avro_namespace,
    node::{FieldDescriptor, RecordDeclaration, RecordDescriptor},
};
use std::collections::BTreeMap;

/// Record-level checks run before any field is looked at.
pub(crate) fn scan_record(decl: &RecordDeclaration) -> Result<(), Diagnostics> {
    let mut errs = Diagnostics::new();

    if !is_avro_name(&decl.name) {
        errs.add(Diagnostic::invalid_name(
            Location::record(&decl.name),
            "record name",
            &decl.name,
        ));
    }
    if let Some(ns) = &decl.namespace
        && !is_avro_namespace(ns)
    {
        errs.add(Diagnostic::invalid_name(
            Location::record(&decl.name),
            "namespace",
            ns,
        ));
    }

    errs.result()
}

/// Sort fields by position and settle their wire names.
pub(crate) fn build_record(decl: RecordDeclaration) -> Result<RecordDescriptor, Diagnostics> {
    let RecordDeclaration {
        name,
        namespace,
        mut fields,
    } = decl;
    let mut errs = Diagnostics::new();

    // stable, so equal positions keep source order
    fields.sort_by_key(|f| f.marker.position());

    for pair in fields.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.marker.position() == b.marker.position() {
            errs.add(Diagnostic::duplicate_position(
                &name,
                a.marker.position(),
                &a.property,
                &b.property,
            ));
        }
    }

    let descriptors: Vec<FieldDescriptor> = fields
        .into_iter()
        .map(|f| FieldDescriptor {
            position: f.marker.position(),
            wire_name: f
                .marker
                .wire_name
                .unwrap_or_else(|| f.property.trim_start_matches("r#").to_string()),
            property: f.property,
            declared: f.declared,
            underlying: f.marker.underlying,
            logical: f.marker.logical,
        })
        .collect();

    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for field in &descriptors {
        if !is_avro_name(&field.wire_name) {
            errs.add(Diagnostic::invalid_name(
                Location::field(&name, &field.property),
                "field name",
                &field.wire_name,
            ));
            continue;
        }
        if let Some(prev) = seen.insert(&field.wire_name, &field.property) {
            errs.add(Diagnostic::duplicate_name(
                &name,
                &field.wire_name,
                prev,
                &field.property,
            ));
        }
    }

    errs.result()?;

    Ok(RecordDescriptor {
        name,
        namespace,
        fields: descriptors,
    })
}

///
/// TESTS
///
