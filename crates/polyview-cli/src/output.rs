//! Output directory handling: atomic JSON writes and manifest regeneration.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use polyview_geometry::GeometryRecord;
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

/// Default manifest filename inside the output directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Errors from writing into the output directory.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not serialize {what}: {source}")]
    Serialize {
        what: String,
        source: serde_json::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("could not scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("output directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),
}

/// A file written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// BLAKE3 hash of the file contents, hex encoded.
    pub hash: String,
    pub size: usize,
}

/// Creates `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory, so readers see either the old file or the complete new one.
pub fn write_json_atomic(path: &Path, contents: &str) -> Result<WrittenFile, OutputError> {
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(WrittenFile {
        path: path.to_path_buf(),
        hash: blake3::hash(contents.as_bytes()).to_hex().to_string(),
        size: contents.len(),
    })
}

/// Serializes `record` and writes it as `dir/file_name`, creating `dir` on
/// demand. Nothing is written when serialization fails.
pub fn write_record(
    dir: &Path,
    file_name: &str,
    record: &GeometryRecord,
) -> Result<WrittenFile, OutputError> {
    let json = record
        .to_json_pretty()
        .map_err(|source| OutputError::Serialize {
            what: file_name.to_string(),
            source,
        })?;
    ensure_dir(dir)?;
    write_json_atomic(&dir.join(file_name), &json)
}

/// Sorted names of the regular `*.json` files directly inside `dir`,
/// excluding `manifest_name`.
pub fn scan_json_files(dir: &Path, manifest_name: &str) -> Result<Vec<String>, OutputError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| OutputError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name != manifest_name {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Rebuilds `dir/manifest_name` from a full rescan of `dir`.
///
/// Returns the manifest entries.
pub fn regenerate_manifest(dir: &Path, manifest_name: &str) -> Result<Vec<String>, OutputError> {
    if !dir.is_dir() {
        return Err(OutputError::MissingDir(dir.to_path_buf()));
    }

    let names = scan_json_files(dir, manifest_name)?;
    let json = serde_json::to_string_pretty(&names).map_err(|source| OutputError::Serialize {
        what: manifest_name.to_string(),
        source,
    })?;
    write_json_atomic(&dir.join(manifest_name), &json)?;
    Ok(names)
}
