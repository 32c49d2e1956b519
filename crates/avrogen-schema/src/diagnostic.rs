use derive_more::{Deref, Display, IntoIterator};
use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

///
/// DiagnosticKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum DiagnosticKind {
    DuplicateName,
    DuplicatePosition,
    EmitFailed,
    InvalidName,
    InvalidOverride,
    MissingLogicalOverride,
    NegativePosition,
    NonExtensibleDeclaration,
    PositionOverflow,
    UnsupportedType,
}

///
/// Location
///
/// Record name plus the property a diagnostic is attached to, if any.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub record: String,
    pub field: Option<String>,
}

impl Location {
    pub fn record(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: None,
        }
    }

    pub fn field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: Some(field.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{field}", self.record),
            None => f.write_str(&self.record),
        }
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn negative_position(record: &str, field: &str, position: i64) -> Self {
        Self::new(
            DiagnosticKind::NegativePosition,
            Location::field(record, field),
            format!("position {position} is negative; positions start at 0"),
        )
    }

    #[must_use]
    pub fn position_overflow(record: &str, field: &str, position: i64) -> Self {
        Self::new(
            DiagnosticKind::PositionOverflow,
            Location::field(record, field),
            format!("position {position} exceeds the largest supported position {}", u32::MAX),
        )
    }

    #[must_use]
    pub fn non_extensible(record: &str, shape: &str) -> Self {
        Self::new(
            DiagnosticKind::NonExtensibleDeclaration,
            Location::record(record),
            format!("records must be structs with named fields, found {shape}"),
        )
    }

    #[must_use]
    pub fn duplicate_position(record: &str, position: u32, first: &str, second: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicatePosition,
            Location::field(record, second),
            format!("position {position} is declared by both '{first}' and '{second}'"),
        )
    }

    #[must_use]
    pub fn duplicate_name(record: &str, name: &str, first: &str, second: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicateName,
            Location::field(record, second),
            format!("wire name '{name}' is used by both '{first}' and '{second}'"),
        )
    }

    #[must_use]
    pub fn invalid_name(location: Location, what: &str, name: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidName,
            location,
            format!("{what} '{name}' is not a valid Avro name"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

///
/// Diagnostics
///
/// Ordered collection; entries keep the order they were detected in.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct Diagnostics(#[into_iterator(owned, ref)] Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn contains_kind(&self, kind: DiagnosticKind) -> bool {
        self.0.iter().any(|d| d.kind == kind)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.0.iter().map(|d| d.kind).collect()
    }

    /// `Ok(())` when nothing was reported.
    pub fn result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

// ============================================================================
// SINKS
// ============================================================================

///
/// DiagnosticSink
///
/// Shared destination for diagnostics; reports may arrive from several
/// worker threads at once.
///

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);

    fn report_all(&self, diagnostics: &Diagnostics) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

///
/// TracingSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            kind = %diagnostic.kind,
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
    }
}

///
/// CollectingSink
///

#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }

    fn report_all(&self, diagnostics: &Diagnostics) {
        // one lock so a record's diagnostics stay contiguous
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(diagnostics.iter().cloned());
    }
}

///
/// TESTS
///
