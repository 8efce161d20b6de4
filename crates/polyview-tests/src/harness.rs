//! Test harness for running the batch driver against a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use polyview_cli::{BatchDriver, BuildResult, DriverConfig, DriverError, RunSummary, MANIFEST_FILENAME};
use polyview_geometry::{GeometryRecord, HullAdapter};
use polyview_shapes::ShapeRegistry;
use tempfile::TempDir;

/// A scratch output directory plus helpers to run and inspect batches.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Output directory used by [`TestHarness::run`]. Not created up front.
    pub fn out_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    /// Driver configuration writing into [`TestHarness::out_dir`].
    pub fn config(&self) -> DriverConfig {
        DriverConfig {
            out_dir: self.out_dir(),
            ..DriverConfig::default()
        }
    }

    /// Run every builder of `registry`.
    pub fn run(
        &self,
        registry: &ShapeRegistry,
        adapter: &HullAdapter,
    ) -> Result<RunSummary, DriverError> {
        self.run_with(registry, adapter, self.config())
    }

    /// Run with an explicit configuration.
    pub fn run_with(
        &self,
        registry: &ShapeRegistry,
        adapter: &HullAdapter,
        config: DriverConfig,
    ) -> Result<RunSummary, DriverError> {
        BatchDriver::new(registry, adapter, config).run(|_| {})
    }

    /// Run every builder of `registry`, reporting each result as it finishes.
    pub fn run_with_progress(
        &self,
        registry: &ShapeRegistry,
        adapter: &HullAdapter,
        on_result: impl FnMut(&BuildResult),
    ) -> Result<RunSummary, DriverError> {
        BatchDriver::new(registry, adapter, self.config()).run(on_result)
    }

    /// Write a file into the output directory, creating it if needed.
    pub fn write_output(&self, name: &str, contents: &str) -> PathBuf {
        fs::create_dir_all(self.out_dir()).expect("Failed to create output dir");
        let path = self.out_dir().join(name);
        fs::write(&path, contents).expect("Failed to write output file");
        path
    }

    /// Read and parse a shape file from the output directory.
    pub fn read_record(&self, name: &str) -> GeometryRecord {
        let path = self.out_dir().join(name);
        let json = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        GeometryRecord::from_json(&json)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
    }

    /// Read raw bytes of a file in the output directory.
    pub fn read_bytes(&self, name: &str) -> Vec<u8> {
        fs::read(self.out_dir().join(name)).expect("Failed to read output file")
    }

    /// Read and parse the manifest.
    pub fn read_manifest(&self) -> Vec<String> {
        let json = fs::read_to_string(self.out_dir().join(MANIFEST_FILENAME))
            .expect("Failed to read manifest");
        serde_json::from_str(&json).expect("Failed to parse manifest")
    }

    /// Sorted names of every entry in the output directory.
    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.out_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
