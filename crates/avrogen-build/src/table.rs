use avrogen_schema::{
    build::PipelineState,
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location},
    node::{DeclaredField, FieldMarker, PositionError, RecordDeclaration},
    types::DeclaredType,
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// TableError
///

#[derive(Debug, ThisError)]
pub enum TableError {
    #[error("cannot read descriptor table '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid descriptor table '{path}': {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

///
/// DescriptorTable
///
/// ```toml
/// [[record]]
/// name = "Reading"
/// namespace = "Fake.Namespace"
///
/// [[record.field]]
/// position = 0
/// property = "property_id"
/// name = "PropertyID"
/// type = "Option<String>"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DescriptorTable {
    #[serde(default, rename = "record")]
    pub records: Vec<TableRecord>,
}

///
/// TableRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableRecord {
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default, rename = "field")]
    pub fields: Vec<TableField>,
}

///
/// TableField
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableField {
    pub position: i64,
    pub property: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub underlying: Option<String>,

    #[serde(default)]
    pub logical: Option<String>,
}

impl DescriptorTable {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, TableError> {
        toml::from_str(text).map_err(|source| TableError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TableRecord {
    /// Scan into a pipeline start state, or a scan failure carrying every
    /// field problem found.
    #[must_use]
    pub fn scan(self, default_namespace: Option<&str>) -> PipelineState {
        let namespace = self
            .namespace
            .or_else(|| default_namespace.map(str::to_string));
        let mut declaration = RecordDeclaration::new(self.name, namespace);
        let mut errs = Diagnostics::new();

        // table records become generated structs
        if syn::parse_str::<syn::Ident>(&declaration.name).is_err() {
            errs.add(Diagnostic::new(
                DiagnosticKind::InvalidName,
                Location::record(&declaration.name),
                format!("record '{}' is not a Rust identifier", declaration.name),
            ));
        }

        for field in self.fields {
            match scan_field(&declaration.name, field) {
                Ok(field) => declaration.push(field),
                Err(d) => errs.add(d),
            }
        }

        match errs.result() {
            Ok(()) => PipelineState::start(declaration),
            Err(errs) => PipelineState::scan_failed(declaration.name, errs),
        }
    }
}

fn scan_field(record: &str, field: TableField) -> Result<DeclaredField, Diagnostic> {
    let TableField {
        position,
        property,
        ty,
        name,
        underlying,
        logical,
    } = field;

    if syn::parse_str::<syn::Ident>(&property).is_err() {
        return Err(Diagnostic::invalid_name(
            Location::field(record, &property),
            "property",
            &property,
        ));
    }

    let mut marker = match FieldMarker::new(position) {
        Ok(marker) => marker,
        Err(PositionError::Negative(p)) => {
            return Err(Diagnostic::negative_position(record, &property, p));
        }
        Err(PositionError::Overflow(p)) => {
            return Err(Diagnostic::position_overflow(record, &property, p));
        }
    };
    marker.wire_name = name;
    marker.underlying = underlying;
    marker.logical = logical;

    let declared = DeclaredType::parse(&ty).map_err(|e| {
        Diagnostic::new(
            DiagnosticKind::UnsupportedType,
            Location::field(record, &property),
            format!("cannot parse type '{ty}': {e}"),
        )
    })?;

    Ok(DeclaredField::new(property, declared, marker))
}

///
/// TESTS
///
