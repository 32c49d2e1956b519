use crate::{BuildError, render::render_record};
use avrogen_schema::{
    build::{GenerationFailure, PipelineState, Stage},
    diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Location},
    emit::RecordArtifacts,
};
use std::{
    num::NonZeroUsize,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

///
/// CancelToken
///
/// Checked between records; a record already in flight runs to completion.
///

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

///
/// RecordOutcome
///

#[derive(Debug)]
pub enum RecordOutcome {
    Generated(Box<RecordArtifacts>),
    Failed(GenerationFailure),
    Skipped { record: String },
}

impl RecordOutcome {
    #[must_use]
    pub fn record(&self) -> &str {
        match self {
            Self::Generated(a) => a.record.name(),
            Self::Failed(f) => &f.record,
            Self::Skipped { record } => record,
        }
    }

    #[must_use]
    pub fn artifacts(&self) -> Option<&RecordArtifacts> {
        match self {
            Self::Generated(a) => Some(a),
            _ => None,
        }
    }
}

///
/// BatchReport
///
/// One outcome per input record, in input order.
///

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn generated(&self) -> impl Iterator<Item = &RecordArtifacts> {
        self.outcomes.iter().filter_map(RecordOutcome::artifacts)
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Failed(f) => Some(f),
            _ => None,
        })
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Skipped { .. }))
            .count()
    }
}

/// Run every pipeline to completion. Records never share state; a failure
/// only affects its own record. Failed records' diagnostics go to `sink`.
pub fn run_batch(
    records: Vec<PipelineState>,
    parallel: bool,
    sink: &dyn DiagnosticSink,
    cancel: &CancelToken,
) -> BatchReport {
    let names: Vec<String> = records.iter().map(|r| r.record_name().to_string()).collect();
    let workers = if parallel {
        thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .min(records.len())
            .max(1)
    } else {
        1
    };

    let queue = Mutex::new(records.into_iter().enumerate());
    let done = Mutex::new(Vec::with_capacity(names.len()));

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let next = queue.lock().unwrap_or_else(PoisonError::into_inner).next();
                    let Some((index, state)) = next else {
                        break;
                    };

                    let outcome = run_one(state, sink);
                    done.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push((index, outcome));
                }
            });
        }
    });

    let mut slots: Vec<Option<RecordOutcome>> = names.iter().map(|_| None).collect();
    for (index, outcome) in done.into_inner().unwrap_or_else(PoisonError::into_inner) {
        slots[index] = Some(outcome);
    }

    let outcomes = slots
        .into_iter()
        .zip(names)
        .map(|(slot, record)| {
            slot.unwrap_or_else(|| {
                tracing::debug!(record = %record, "record skipped after cancellation");
                RecordOutcome::Skipped { record }
            })
        })
        .collect();

    BatchReport { outcomes }
}

fn run_one(state: PipelineState, sink: &dyn DiagnosticSink) -> RecordOutcome {
    let _span = tracing::debug_span!("record", name = %state.record_name()).entered();

    let failure = match state.run() {
        Ok(artifacts) => match render_record(&artifacts) {
            Ok(_) => return RecordOutcome::Generated(Box::new(artifacts)),
            Err(err) => render_failure(&artifacts, &err),
        },
        Err(failure) => failure,
    };

    sink.report_all(&failure.diagnostics);
    RecordOutcome::Failed(failure)
}

// render_failure
// records whose generated items do not render fail on their own instead
// of aborting the output file
fn render_failure(artifacts: &RecordArtifacts, err: &BuildError) -> GenerationFailure {
    let record = artifacts.record.name().to_string();
    let diagnostic = Diagnostic::new(
        DiagnosticKind::EmitFailed,
        Location::record(&record),
        format!("cannot render generated code: {err}"),
    );

    GenerationFailure {
        record,
        stage: Stage::Emitting,
        diagnostics: diagnostic.into(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use avrogen_schema::{
        diagnostic::CollectingSink,
        node::{DeclaredField, FieldMarker, RecordDeclaration},
        types::DeclaredType,
    };

    fn record(name: &str, positions: &[u32]) -> PipelineState {
        let mut decl = RecordDeclaration::new(name, None);
        for (i, p) in positions.iter().enumerate() {
            decl.push(DeclaredField::new(
                format!("f{i}"),
                DeclaredType::parse("i64").unwrap(),
                FieldMarker::at(*p),
            ));
        }

        PipelineState::start(decl)
    }

    #[test]
    fn a_failing_record_does_not_affect_its_siblings() {
        let sink = CollectingSink::new();
        let report = run_batch(
            vec![record("Broken", &[0, 0]), record("Valid", &[0, 1])],
            true,
            &sink,
            &CancelToken::new(),
        );

        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(report.outcomes[0], RecordOutcome::Failed(_)));
        assert_eq!(report.outcomes[1].record(), "Valid");
        assert_eq!(report.generated().count(), 1);

        let seen = sink.take();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, DiagnosticKind::DuplicatePosition);
        assert_eq!(seen[0].location.record, "Broken");
    }

    #[test]
    fn unrenderable_records_fail_alone() {
        let sink = CollectingSink::new();
        let report = run_batch(
            vec![record("match", &[0]), record("Valid", &[0])],
            true,
            &sink,
            &CancelToken::new(),
        );

        let RecordOutcome::Failed(failure) = &report.outcomes[0] else {
            panic!("expected the keyword record to fail");
        };
        assert_eq!(failure.stage, Stage::Emitting);
        assert_eq!(report.outcomes[1].record(), "Valid");
        assert_eq!(report.generated().count(), 1);

        let seen = sink.take();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, DiagnosticKind::EmitFailed);
        assert_eq!(seen[0].location.record, "match");
    }

    #[test]
    fn outcomes_keep_input_order() {
        let names: Vec<String> = (0..16).map(|i| format!("R{i}")).collect();
        let records = names.iter().map(|n| record(n, &[1, 0])).collect();

        let report = run_batch(records, true, &CollectingSink::new(), &CancelToken::new());
        let seen: Vec<&str> = report.outcomes.iter().map(RecordOutcome::record).collect();

        assert_eq!(seen, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn cancelled_batches_skip_unstarted_records() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = run_batch(
            vec![record("A", &[0]), record("B", &[0])],
            false,
            &CollectingSink::new(),
            &cancel,
        );

        assert_eq!(report.skipped(), 2);
        assert_eq!(report.outcomes[1].record(), "B");
    }

    #[test]
    fn sequential_and_parallel_runs_agree() {
        let build = || (0..8).map(|i| record(&format!("R{i}"), &[2, 0, 1])).collect();

        let a = run_batch(build(), false, &CollectingSink::new(), &CancelToken::new());
        let b = run_batch(build(), true, &CollectingSink::new(), &CancelToken::new());

        let json = |r: &BatchReport| r.generated().map(|x| x.schema_json.clone()).collect::<Vec<_>>();
        assert_eq!(json(&a), json(&b));
    }
}
