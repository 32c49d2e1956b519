use avrogen_schema::{
    build::PipelineState,
    diagnostic::{Diagnostic, Diagnostics},
    node::{DeclaredField, FieldMarker, PositionError, RecordDeclaration},
    types::DeclaredType,
};
use darling::{Error as DarlingError, FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use std::collections::HashMap;
use syn::{Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Generics, Ident, Lit, UnOp};

///
/// RecordArgs
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(avro_record))]
struct RecordArgs {
    ident: Ident,
    generics: Generics,

    #[darling(default)]
    name: Option<String>,

    #[darling(default)]
    namespace: Option<String>,
}

///
/// FieldArgs
///

#[derive(Debug, FromField)]
#[darling(attributes(avro))]
struct FieldArgs {
    ident: Option<Ident>,
    ty: syn::Type,

    position: Expr,

    #[darling(default)]
    name: Option<String>,

    #[darling(default)]
    underlying: Option<String>,

    #[darling(default)]
    logical: Option<String>,
}

// derive_avro_record
pub fn derive_avro_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream, DarlingError> {
    let args = RecordArgs::from_derive_input(input)?;
    let record = args.name.clone().unwrap_or_else(|| args.ident.to_string());

    let mut spans = HashMap::new();
    let state = match scan(input, &args, &record, &mut spans)? {
        Ok(declaration) => PipelineState::start(declaration),
        Err(diagnostics) => PipelineState::scan_failed(&record, diagnostics),
    };

    match state.run() {
        Ok(artifacts) => Ok(artifacts.accessor_tokens(&args.ident, &args.generics)),
        Err(failure) => Err(to_darling(&failure.diagnostics, &spans, &args.ident)),
    }
}

/// Collect the marked fields. Darling errors (malformed attributes) abort the
/// derive; position problems are returned as diagnostics.
fn scan(
    input: &DeriveInput,
    args: &RecordArgs,
    record: &str,
    spans: &mut HashMap<String, Ident>,
) -> Result<Result<RecordDeclaration, Diagnostics>, DarlingError> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) => return Ok(Err(non_extensible(record, "a tuple struct"))),
            Fields::Unit => return Ok(Err(non_extensible(record, "a unit struct"))),
        },
        Data::Enum(_) => return Ok(Err(non_extensible(record, "an enum"))),
        Data::Union(_) => return Ok(Err(non_extensible(record, "a union"))),
    };

    let mut declaration = RecordDeclaration::new(record, args.namespace.clone());
    let mut diagnostics = Diagnostics::new();
    let mut errors = DarlingError::accumulator();

    for field in named {
        if !field.attrs.iter().any(|a| a.path().is_ident("avro")) {
            continue;
        }
        let Some(field_args) = errors.handle(FieldArgs::from_field(field)) else {
            continue;
        };
        let Some(ident) = field_args.ident.as_ref() else {
            continue;
        };
        let property = ident.to_string();
        spans.insert(property.clone(), ident.clone());

        let Some(position) = errors.handle(literal_position(&field_args.position)) else {
            continue;
        };

        let mut marker = match FieldMarker::new(position) {
            Ok(marker) => marker,
            Err(PositionError::Negative(p)) => {
                diagnostics.add(Diagnostic::negative_position(record, &property, p));
                continue;
            }
            Err(PositionError::Overflow(p)) => {
                diagnostics.add(Diagnostic::position_overflow(record, &property, p));
                continue;
            }
        };

        let FieldArgs {
            ty,
            name,
            underlying,
            logical,
            ..
        } = field_args;

        marker.wire_name = name;
        marker.underlying = underlying;
        marker.logical = logical;

        declaration.push(DeclaredField::new(
            property,
            DeclaredType::from_syn(&ty),
            marker,
        ));
    }

    errors.finish()?;

    Ok(diagnostics.result().map(|()| declaration))
}

fn non_extensible(record: &str, shape: &str) -> Diagnostics {
    Diagnostic::non_extensible(record, shape).into()
}

// literal_position
// integer literal, optionally negated, so negative positions reach the
// pipeline as diagnostics rather than parse errors
fn literal_position(expr: &Expr) -> Result<i64, DarlingError> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<i64>().map_err(DarlingError::from),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => literal_position(inner)?
            .checked_neg()
            .ok_or_else(|| DarlingError::custom("position out of range").with_span(expr)),
        Expr::Group(group) => literal_position(&group.expr),
        Expr::Paren(paren) => literal_position(&paren.expr),
        other => Err(DarlingError::custom("position must be an integer literal").with_span(other)),
    }
}

fn to_darling(
    diagnostics: &Diagnostics,
    spans: &HashMap<String, Ident>,
    record: &Ident,
) -> DarlingError {
    let errors = diagnostics
        .iter()
        .map(|d| {
            let ident = d
                .location
                .field
                .as_ref()
                .and_then(|f| spans.get(f))
                .unwrap_or(record);

            DarlingError::custom(format!("[{}] {}", d.kind, d.message)).with_span(ident)
        })
        .collect();

    DarlingError::multiple(errors)
}

///
/// TESTS
///
