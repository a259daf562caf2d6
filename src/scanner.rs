//! Candidate collection: list a directory and keep the files whose names match.

use crate::error::{Error, Result};
use crate::template::{FieldValue, Fields, NameMatcher};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file whose name matched the template
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
    pub fields: Fields,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, fields: Fields, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Candidate {
            path,
            name,
            fields,
            size,
            modified: None,
        }
    }

    /// File name without its final extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Value used to rank this candidate: the named field, or the file stem
    /// when no ordering field is configured
    pub fn order_value(&self, field: Option<&str>) -> Option<FieldValue> {
        match field {
            Some(field) => self.fields.get(field).cloned(),
            None => Some(FieldValue::Str(self.stem().to_string())),
        }
    }
}

/// Result of listing one directory
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matched files, in file name order
    pub candidates: Vec<Candidate>,
    /// Regular files whose names did not match
    pub excluded: Vec<PathBuf>,
}

/// List the direct children of `dir` and match every regular file against `matcher`.
///
/// Directories and symlinks are skipped. Files that don't match are reported
/// in `excluded` and are never candidates. Fails only if `dir` itself cannot
/// be read.
pub fn collect_candidates(dir: &Path, matcher: &dyn NameMatcher) -> Result<ScanResult> {
    let access_error = |source: io::Error| Error::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(access_error)?;
    if !metadata.is_dir() {
        return Err(access_error(io::Error::other("not a directory")));
    }

    let mut result = ScanResult::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(access_error(err.into())),
            Err(err) => {
                warn!("Failed to access entry in {}: {}", dir.display(), err);
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();

        // Skip symlinks entirely - don't follow them or delete their targets
        if file_type.is_symlink() {
            debug!("Skipping symlink: {}", path.display());
            continue;
        }
        if !file_type.is_file() {
            debug!("Skipping non-file entry: {}", path.display());
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        let Some(fields) = matcher.match_name(name) else {
            debug!("Excluded (no match): {}", name);
            result.excluded.push(path.to_path_buf());
            continue;
        };

        let metadata = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                warn!("Could not get metadata for {}: {}", path.display(), err);
                continue;
            }
        };

        result.candidates.push(Candidate {
            name: name.to_string(),
            path: entry.into_path(),
            fields,
            size: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }

    debug!(
        "Collected {} candidates, {} excluded in {}",
        result.candidates.len(),
        result.excluded.len(),
        dir.display()
    );

    Ok(result)
}
