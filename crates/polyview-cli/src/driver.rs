//! Batch driver: runs every selected builder, writes one JSON file per
//! successful shape and regenerates the manifest.
//!
//! Each builder is an isolated unit of work. Errors and panics inside a
//! builder, the exporter or the writer become a failed [`BuildResult`] and
//! never stop the batch. Only a failed capability probe or an unknown shape
//! selection aborts the run, and both happen before any file is touched.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use polyview_geometry::{to_record, GeometryError, HullAdapter, HullError};
use polyview_shapes::{BuildOutcome, RegistryError, ShapeEntry, ShapeRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::{self, DEFAULT_OUTPUT_DIR, MANIFEST_FILENAME};

/// Outcome of a single builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Success,
    Fail,
}

/// Result of running a single builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    /// Registry module of the builder
    pub module: String,
    /// Builder function name
    pub function: String,
    /// Output filename, `{identifier}.json`
    pub json_file: String,
    pub status: BuildStatus,
    /// Failure reason; empty on success
    pub message: String,
    /// Stable code of a typed failure, such as `EXPORT_001`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// BLAKE3 hash of the written file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Time spent in this unit of work in milliseconds
    pub duration_ms: u64,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        self.status == BuildStatus::Success
    }
}

/// What happened to the manifest at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ManifestOutcome {
    Written { path: String, entries: usize },
    Failed { error: String },
}

impl ManifestOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ManifestOutcome::Written { .. })
    }
}

/// Summary report for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Timestamp of the run (UTC, RFC 3339)
    pub timestamp: String,
    /// Builders selected for this run
    pub functions_found: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Total runtime in seconds
    pub runtime_seconds: f64,
    pub manifest: ManifestOutcome,
    /// Results sorted by (module, function)
    pub results: Vec<BuildResult>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Number of failed results per error code. Untyped failures (declined
    /// builders, panics, write errors) are not counted.
    pub fn failure_codes(&self) -> BTreeMap<&str, usize> {
        let mut codes = BTreeMap::new();
        for code in self.results.iter().filter_map(|r| r.error_code.as_deref()) {
            *codes.entry(code).or_insert(0) += 1;
        }
        codes
    }
}

/// Driver settings, filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub out_dir: PathBuf,
    pub manifest_name: String,
    /// Shape identifiers or function names to run; empty runs everything
    pub only: Vec<String>,
    pub verbose: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            manifest_name: MANIFEST_FILENAME.to_string(),
            only: Vec::new(),
            verbose: false,
        }
    }
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("hull capability unavailable (provider '{provider}'): {source}")]
    CapabilityUnavailable {
        provider: &'static str,
        source: HullError,
    },

    #[error(transparent)]
    UnknownShape(#[from] RegistryError),
}

/// Runs the builders of a registry against one hull adapter.
pub struct BatchDriver<'a> {
    registry: &'a ShapeRegistry,
    adapter: &'a HullAdapter,
    config: DriverConfig,
}

impl<'a> BatchDriver<'a> {
    pub fn new(registry: &'a ShapeRegistry, adapter: &'a HullAdapter, config: DriverConfig) -> Self {
        Self {
            registry,
            adapter,
            config,
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Runs the batch. `on_result` sees every result as soon as its unit of
    /// work finishes, in execution order.
    pub fn run(&self, mut on_result: impl FnMut(&BuildResult)) -> Result<RunSummary, DriverError> {
        let start = Instant::now();
        let entries = self.registry.select(&self.config.only)?;

        self.adapter
            .probe()
            .map_err(|source| DriverError::CapabilityUnavailable {
                provider: self.adapter.provider_name(),
                source,
            })?;

        let mut results = Vec::with_capacity(entries.len());
        for entry in &entries {
            let result = self.run_one(entry);
            on_result(&result);
            results.push(result);
        }

        let manifest = self.write_manifest();

        results.sort_by(|a, b| {
            (a.module.as_str(), a.function.as_str()).cmp(&(b.module.as_str(), b.function.as_str()))
        });
        let succeeded = results.iter().filter(|r| r.is_success()).count();

        Ok(RunSummary {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            functions_found: entries.len(),
            succeeded,
            failed: results.len() - succeeded,
            runtime_seconds: start.elapsed().as_secs_f64(),
            manifest,
            results,
        })
    }

    /// Runs one builder, export and write, catching every failure.
    fn run_one(&self, entry: &ShapeEntry) -> BuildResult {
        let start = Instant::now();
        let mut result = BuildResult {
            module: entry.module.clone(),
            function: entry.function.clone(),
            json_file: entry.json_file(),
            status: BuildStatus::Fail,
            message: String::new(),
            error_code: None,
            hash: None,
            duration_ms: 0,
        };

        match self.process(entry, &result.json_file) {
            Ok(hash) => {
                result.status = BuildStatus::Success;
                result.hash = Some(hash);
            }
            Err(failure) => {
                result.message = failure.message;
                result.error_code = failure.code.map(str::to_string);
            }
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    /// Returns the hash of the written file, or why the unit failed.
    fn process(&self, entry: &ShapeEntry, json_file: &str) -> Result<String, Failure> {
        let built = panic::catch_unwind(AssertUnwindSafe(|| (entry.build)(self.adapter)));
        let (polyhedron, name) = match built {
            Ok(Ok(BuildOutcome::Built { polyhedron, name })) => (polyhedron, name),
            Ok(Ok(BuildOutcome::Declined { message })) => return Err(Failure::new(message)),
            Ok(Err(e)) => return Err(Failure::typed("Execution error", &e)),
            Err(payload) => {
                return Err(Failure::new(format!(
                    "Execution error: {}",
                    panic_message(&*payload)
                )))
            }
        };

        let record = match panic::catch_unwind(AssertUnwindSafe(|| to_record(&polyhedron, &name))) {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => return Err(Failure::typed("Conversion failed", &e)),
            Err(payload) => {
                return Err(Failure::new(format!(
                    "Conversion failed: {}",
                    panic_message(&*payload)
                )))
            }
        };

        output::write_record(&self.config.out_dir, json_file, &record)
            .map(|written| written.hash)
            .map_err(|e| Failure::new(format!("Save failed: {}", e)))
    }

    fn write_manifest(&self) -> ManifestOutcome {
        let dir = &self.config.out_dir;
        let regenerated = output::ensure_dir(dir)
            .and_then(|_| output::regenerate_manifest(dir, &self.config.manifest_name));
        match regenerated {
            Ok(entries) => ManifestOutcome::Written {
                path: dir.join(&self.config.manifest_name).display().to_string(),
                entries: entries.len(),
            },
            Err(e) => ManifestOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

struct Failure {
    message: String,
    code: Option<&'static str>,
}

impl Failure {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    fn typed(prefix: &str, error: &dyn GeometryError) -> Self {
        Self {
            message: format!("{}: {}", prefix, error.message()),
            code: Some(error.code()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "builder panicked".to_string()
    }
}
