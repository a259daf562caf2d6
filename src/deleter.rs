//! Removing the files the selector gave up on.

use crate::scanner::Candidate;

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// A file that could not be removed
#[derive(Debug)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub kind: io::ErrorKind,
    pub message: String,
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    /// Already gone, the end state is reached anyway
    AlreadyAbsent,
    /// Left in place by `--dry-run`
    Skipped,
    Failed,
}

/// Summary of one deletion pass
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<PathBuf>,
    pub already_absent: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<DeletionFailure>,
    pub bytes_freed: u64,
}

impl DeletionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, candidate: &Candidate, result: io::Result<()>) -> DeletionOutcome {
        match result {
            Ok(()) => {
                info!("Removed: {}", candidate.path.display());
                self.bytes_freed += candidate.size;
                self.deleted.push(candidate.path.clone());
                DeletionOutcome::Deleted
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("Already gone: {}", candidate.path.display());
                self.already_absent.push(candidate.path.clone());
                DeletionOutcome::AlreadyAbsent
            }
            Err(err) => {
                warn!("Error removing {}: {}", candidate.path.display(), err);
                self.failed.push(DeletionFailure {
                    path: candidate.path.clone(),
                    kind: err.kind(),
                    message: err.to_string(),
                });
                DeletionOutcome::Failed
            }
        }
    }
}

/// Removes candidates one by one; a failure never stops the rest
#[derive(Debug, Clone, Copy, Default)]
pub struct Deleter {
    dry_run: bool,
}

impl Deleter {
    pub fn new(dry_run: bool) -> Self {
        Deleter { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Remove one file and add the outcome to `report`
    pub fn delete_one(&self, candidate: &Candidate, report: &mut DeletionReport) -> DeletionOutcome {
        if self.dry_run {
            info!("Would remove: {}", candidate.path.display());
            report.skipped.push(candidate.path.clone());
            return DeletionOutcome::Skipped;
        }
        report.record(candidate, fs::remove_file(&candidate.path))
    }

    pub fn delete<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a Candidate>,
    ) -> DeletionReport {
        let mut report = DeletionReport::default();
        for candidate in candidates {
            self.delete_one(candidate, &mut report);
        }
        report
    }
}
