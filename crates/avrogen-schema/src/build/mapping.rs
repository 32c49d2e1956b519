use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location},
    node::{FieldDescriptor, RecordDescriptor, ResolvedField, ResolvedRecord},
    types::{LogicalType, Primitive, WireType},
};

/// Resolve every field's wire type, collecting all failures.
pub(crate) fn resolve_record(desc: RecordDescriptor) -> Result<ResolvedRecord, Diagnostics> {
    let RecordDescriptor {
        name,
        namespace,
        fields,
    } = desc;
    let mut errs = Diagnostics::new();
    let mut resolved = Vec::with_capacity(fields.len());

    for field in fields {
        match resolve_field(&name, &field) {
            Ok(wire) => resolved.push(ResolvedField {
                descriptor: field,
                wire,
            }),
            Err(d) => errs.add(d),
        }
    }

    errs.result()?;

    Ok(ResolvedRecord {
        name,
        namespace,
        fields: resolved,
    })
}

/// Wire type for one field.
///
/// * both overrides present: used verbatim if the pair is consistent and the
///   declared kind can be coerced through the logical type
/// * temporal kinds require both overrides
/// * otherwise the declared kind's default primitive, which an underlying
///   override may only restate
pub fn resolve_field(record: &str, field: &FieldDescriptor) -> Result<WireType, Diagnostic> {
    let declared = field.declared();
    let kind = &declared.kind;
    let fail = |diagnostic: DiagnosticKind, message: String| {
        Diagnostic::new(diagnostic, Location::field(record, field.property()), message)
    };

    let (primitive, logical) = match (field.underlying(), field.logical()) {
        (Some(underlying), Some(logical)) => {
            let primitive = parse_primitive(underlying)
                .map_err(|m| fail(DiagnosticKind::InvalidOverride, m))?;
            let logical = parse_logical(logical)
                .map_err(|m| fail(DiagnosticKind::InvalidOverride, m))?;

            if logical.underlying() != primitive {
                return Err(fail(
                    DiagnosticKind::InvalidOverride,
                    format!(
                        "logical type '{logical}' requires underlying type '{}', found '{primitive}'",
                        logical.underlying()
                    ),
                ));
            }
            if !kind.accepts_logical(logical) {
                return Err(fail(
                    DiagnosticKind::InvalidOverride,
                    format!("declared type {declared} cannot be coerced through logical type '{logical}'"),
                ));
            }

            (primitive, Some(logical))
        }

        _ if kind.is_temporal() => {
            return Err(fail(
                DiagnosticKind::MissingLogicalOverride,
                format!(
                    "temporal field of type {declared} needs both an underlying and a logical override, \
                     e.g. underlying = \"long\", logical = \"timestamp-micros\""
                ),
            ));
        }

        (_, Some(logical)) => {
            return Err(fail(
                DiagnosticKind::InvalidOverride,
                format!(
                    "logical type '{logical}' needs an underlying override and a declared type that supports it, found {declared}"
                ),
            ));
        }

        (underlying, None) => {
            let Some(default) = kind.default_primitive() else {
                return Err(fail(
                    DiagnosticKind::UnsupportedType,
                    format!("declared type {declared} has no Avro mapping"),
                ));
            };

            if let Some(underlying) = underlying {
                let primitive = parse_primitive(underlying)
                    .map_err(|m| fail(DiagnosticKind::InvalidOverride, m))?;
                if primitive != default {
                    return Err(fail(
                        DiagnosticKind::InvalidOverride,
                        format!(
                            "underlying type '{primitive}' does not match declared type {declared}, expected '{default}'"
                        ),
                    ));
                }
            }

            (default, None)
        }
    };

    Ok(WireType::new(primitive, logical, declared.optional))
}

fn parse_primitive(text: &str) -> Result<Primitive, String> {
    let primitive = text.parse::<Primitive>().map_err(|e| e.to_string())?;
    if primitive == Primitive::Null {
        return Err("underlying type 'null' is not allowed for a field".to_string());
    }

    Ok(primitive)
}

fn parse_logical(text: &str) -> Result<LogicalType, String> {
    text.parse::<LogicalType>().map_err(|e| e.to_string())
}

///
/// TESTS
///
