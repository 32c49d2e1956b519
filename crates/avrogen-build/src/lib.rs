pub mod batch;
pub mod cache;
pub mod config;
mod macros;
pub mod render;
pub mod table;

use crate::{
    batch::{BatchReport, CancelToken, run_batch},
    cache::InputHash,
    config::{BuildConfig, ConfigError},
    table::{DescriptorTable, TableError},
};
use avrogen_schema::{
    build::PipelineState,
    diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Location},
    emit::schema::SchemaError,
};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("record '{record}' has {schema} schema fields but {dispatch} dispatch entries")]
    FieldCount {
        record: String,
        schema: usize,
        dispatch: usize,
    },

    #[error("cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("OUT_DIR is not set; the build! macro must run inside a build script")]
    MissingOutDir,

    #[error("{count} record(s) failed to generate: {records}")]
    RecordsFailed { count: usize, records: String },

    #[error("cannot render generated code: {0}")]
    Render(#[from] syn::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Table(#[from] TableError),
}

///
/// BuildReport
///

#[derive(Debug)]
pub struct BuildReport {
    pub output: PathBuf,
    /// Inputs were unchanged and generation was skipped.
    pub cache_hit: bool,
    pub batch: BatchReport,
}

///
/// CargoSink
///
/// Forwards diagnostics to cargo as build warnings.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CargoSink;

impl DiagnosticSink for CargoSink {
    fn report(&self, diagnostic: &Diagnostic) {
        println!("cargo:warning={diagnostic}");
    }
}

/// Generate every record named by `config` into one file under `out_dir`.
///
/// Records are isolated: a record that fails is left out of the file and
/// reported through `sink`, the rest are written.
pub fn generate(
    config: &BuildConfig,
    out_dir: &Path,
    sink: &dyn DiagnosticSink,
    cancel: &CancelToken,
) -> Result<BuildReport, BuildError> {
    let mut tables = Vec::new();
    for path in config.table_paths() {
        let text = fs::read_to_string(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;
        tables.push((path, text));
    }

    let output = out_dir.join(&config.generate.output);
    let hash = InputHash::compute(&config.source, tables.iter().map(|(_, t)| t.as_str()));

    if config.generate.cache && cache::is_fresh(&output, hash) {
        tracing::info!(output = %output.display(), "avrogen output is up to date");

        return Ok(BuildReport {
            output,
            cache_hit: true,
            batch: BatchReport::default(),
        });
    }

    let mut states = Vec::new();
    for (path, text) in &tables {
        let table = DescriptorTable::parse(path, text)?;
        let namespace = config.generate.namespace.as_deref();

        states.extend(table.records.into_iter().map(|r| r.scan(namespace)));
    }

    let states = reject_duplicate_records(states);
    let batch = run_batch(states, config.generate.parallel, sink, cancel);
    let source = render::render_file(batch.generated())?;
    fs::write(&output, source).map_err(|source| BuildError::Io {
        path: output.clone(),
        source,
    })?;

    let generated = batch.generated().count();
    let failed = batch.failures().count();
    let skipped = batch.skipped();

    if config.generate.cache && failed == 0 && skipped == 0 {
        cache::store(&output, hash).map_err(|source| BuildError::Io {
            path: cache::stamp_path(&output),
            source,
        })?;
    }

    tracing::info!(
        output = %output.display(),
        generated,
        failed,
        skipped,
        "avrogen build finished"
    );

    Ok(BuildReport {
        output,
        cache_hit: false,
        batch,
    })
}

// reject_duplicate_records
// every record becomes a struct in the same file, so names must be unique
// across all tables; the first declaration keeps the name
fn reject_duplicate_records(states: Vec<PipelineState>) -> Vec<PipelineState> {
    let mut seen = BTreeSet::new();

    states
        .into_iter()
        .map(|state| {
            let name = state.record_name().to_string();
            if seen.insert(name.clone()) {
                return state;
            }

            let diagnostic = Diagnostic::new(
                DiagnosticKind::DuplicateName,
                Location::record(&name),
                format!("record '{name}' is declared more than once"),
            );
            PipelineState::scan_failed(name, diagnostic.into())
        })
        .collect()
}

/// Body of the `build!` macro.
pub fn run_build_script(config_path: &str) -> Result<BuildReport, BuildError> {
    let out_dir = std::env::var_os("OUT_DIR").ok_or(BuildError::MissingOutDir)?;
    let config = BuildConfig::from_path(config_path)?;

    for table in config.table_paths() {
        println!("cargo:rerun-if-changed={}", table.display());
    }

    let report = generate(&config, Path::new(&out_dir), &CargoSink, &CancelToken::new())?;

    let failed: Vec<&str> = report.batch.failures().map(|f| f.record.as_str()).collect();
    if !failed.is_empty() {
        return Err(BuildError::RecordsFailed {
            count: failed.len(),
            records: failed.join(", "),
        });
    }

    Ok(report)
}

///
/// TESTS
///
