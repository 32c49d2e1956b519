pub(crate) mod builder;
pub mod mapping;

use crate::{
    diagnostic::Diagnostics,
    emit::{self, RecordArtifacts},
    node::{RecordDeclaration, RecordDescriptor, ResolvedRecord},
};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Stage
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Stage {
    Scanning,
    Building,
    TypeMapping,
    Emitting,
    Done,
}

///
/// GenerationFailure
///
/// Terminal failure for one record: the stage that failed plus everything
/// it reported, in detection order.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("record '{record}' failed during {stage}:\n{diagnostics}")]
pub struct GenerationFailure {
    pub record: String,
    pub stage: Stage,
    pub diagnostics: Diagnostics,
}

///
/// PipelineState
///
/// Scanning -> Building -> TypeMapping -> Emitting -> Done, with a jump to
/// Failed from any non-terminal state. Each record runs its own pipeline.
///

#[derive(Debug)]
pub enum PipelineState {
    Scanning(RecordDeclaration),
    Building(RecordDeclaration),
    TypeMapping(RecordDescriptor),
    Emitting(ResolvedRecord),
    Done(Box<RecordArtifacts>),
    Failed(GenerationFailure),
}

impl PipelineState {
    #[must_use]
    pub const fn start(declaration: RecordDeclaration) -> Self {
        Self::Scanning(declaration)
    }

    /// Failure raised by a front end before a declaration could be built.
    pub fn scan_failed(record: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Self::Failed(GenerationFailure {
            record: record.into(),
            stage: Stage::Scanning,
            diagnostics,
        })
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Scanning(_) => Stage::Scanning,
            Self::Building(_) => Stage::Building,
            Self::TypeMapping(_) => Stage::TypeMapping,
            Self::Emitting(_) => Stage::Emitting,
            Self::Done(_) => Stage::Done,
            Self::Failed(failure) => failure.stage,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }

    #[must_use]
    pub fn record_name(&self) -> &str {
        match self {
            Self::Scanning(d) | Self::Building(d) => &d.name,
            Self::TypeMapping(d) => d.name(),
            Self::Emitting(r) => r.name(),
            Self::Done(a) => a.record.name(),
            Self::Failed(f) => &f.record,
        }
    }

    /// Take one step. Terminal states are returned unchanged.
    #[must_use]
    pub fn advance(self) -> Self {
        let stage = self.stage();
        let record = self.record_name().to_string();

        let next = match self {
            Self::Scanning(decl) => match builder::scan_record(&decl) {
                Ok(()) => Self::Building(decl),
                Err(diagnostics) => Self::fail(record, stage, diagnostics),
            },
            Self::Building(decl) => match builder::build_record(decl) {
                Ok(desc) => Self::TypeMapping(desc),
                Err(diagnostics) => Self::fail(record, stage, diagnostics),
            },
            Self::TypeMapping(desc) => match mapping::resolve_record(desc) {
                Ok(resolved) => Self::Emitting(resolved),
                Err(diagnostics) => Self::fail(record, stage, diagnostics),
            },
            Self::Emitting(resolved) => match emit::emit_record(resolved) {
                Ok(artifacts) => Self::Done(Box::new(artifacts)),
                Err(diagnostics) => Self::fail(record, stage, diagnostics),
            },
            terminal @ (Self::Done(_) | Self::Failed(_)) => return terminal,
        };

        match &next {
            Self::Failed(failure) => tracing::debug!(
                record = %failure.record,
                stage = %failure.stage,
                diagnostics = failure.diagnostics.len(),
                "pipeline failed"
            ),
            _ => tracing::debug!(
                record = %next.record_name(),
                from = %stage,
                to = %next.stage(),
                "pipeline step"
            ),
        }

        next
    }

    /// Drive the pipeline to a terminal state.
    pub fn run(self) -> Result<RecordArtifacts, GenerationFailure> {
        let mut state = self;

        loop {
            state = match state {
                Self::Done(artifacts) => return Ok(*artifacts),
                Self::Failed(failure) => return Err(failure),
                pending => pending.advance(),
            };
        }
    }

    const fn fail(record: String, stage: Stage, diagnostics: Diagnostics) -> Self {
        Self::Failed(GenerationFailure {
            record,
            stage,
            diagnostics,
        })
    }
}

/// Run the whole pipeline for one declaration.
pub fn generate(declaration: RecordDeclaration) -> Result<RecordArtifacts, GenerationFailure> {
    let _span = tracing::debug_span!("generate", record = %declaration.name).entered();

    PipelineState::start(declaration).run()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostic::{Diagnostic, DiagnosticKind},
        node::{DeclaredField, FieldMarker},
        types::DeclaredType,
    };

    fn field(property: &str, ty: &str, marker: FieldMarker) -> DeclaredField {
        DeclaredField::new(property, DeclaredType::parse(ty).unwrap(), marker)
    }

    fn reading() -> RecordDeclaration {
        RecordDeclaration::new("Reading", Some("Fake.Namespace".into()))
            .with_field(field("gallons", "Option<f64>", FieldMarker::at(1)))
            .with_field(field(
                "property_id",
                "Option<String>",
                FieldMarker::at(0).with_wire_name("PropertyID"),
            ))
    }

    #[test]
    fn states_advance_in_order() {
        let mut state = PipelineState::start(reading());
        let mut seen = vec![state.stage()];

        while !state.is_terminal() {
            state = state.advance();
            seen.push(state.stage());
        }

        assert_eq!(
            seen,
            vec![
                Stage::Scanning,
                Stage::Building,
                Stage::TypeMapping,
                Stage::Emitting,
                Stage::Done
            ]
        );
    }

    #[test]
    fn terminal_states_do_not_move() {
        let failed = PipelineState::scan_failed(
            "Thing",
            Diagnostic::non_extensible("Thing", "an enum").into(),
        );
        let again = failed.advance();

        assert!(again.is_terminal());
        assert_eq!(again.stage(), Stage::Scanning);
    }

    #[test]
    fn failures_record_the_failing_stage() {
        let decl = reading().with_field(field("dup", "i64", FieldMarker::at(1)));
        let failure = generate(decl).unwrap_err();

        assert_eq!(failure.stage, Stage::Building);
        assert_eq!(failure.record, "Reading");
        assert!(failure.diagnostics.contains_kind(DiagnosticKind::DuplicatePosition));

        let decl = reading().with_field(field("hour", "OffsetDateTime", FieldMarker::at(2)));
        let failure = generate(decl).unwrap_err();

        assert_eq!(failure.stage, Stage::TypeMapping);
    }

    #[test]
    fn single_steps_keep_the_record_name() {
        let decl = reading().with_field(field("dup", "i64", FieldMarker::at(0)));

        let building = PipelineState::start(decl).advance();
        assert_eq!(building.stage(), Stage::Building);
        assert_eq!(building.record_name(), "Reading");

        let failed = building.advance();
        let PipelineState::Failed(failure) = &failed else {
            panic!("expected a failed state, got {:?}", failed.stage());
        };
        assert_eq!(failure.record, "Reading");
        assert_eq!(failure.stage, Stage::Building);
        assert_eq!(failed.record_name(), "Reading");
    }

    #[test]
    fn done_carries_schema_and_dispatch() {
        let artifacts = generate(reading()).unwrap();

        assert_eq!(artifacts.record.full_name(), "Fake.Namespace.Reading");
        assert_eq!(artifacts.dispatch.len(), 2);
        assert!(artifacts.schema_json.starts_with(r#"{"type":"record","name":"Reading""#));
    }

    #[test]
    fn artifacts_are_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<RecordArtifacts>();
        assert_send::<GenerationFailure>();
    }
}
