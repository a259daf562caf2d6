//! One pruning run: collect candidates, select, delete.

use crate::deleter::{DeletionReport, Deleter};
use crate::error::Result;
use crate::retention::{select, RetentionPolicy, Selection};
use crate::scanner::{collect_candidates, ScanResult};
use crate::template::{MatchAll, Template};

use std::path::{Path, PathBuf};
use tracing::debug;

/// Inputs of a run
pub struct PruneOptions<'a> {
    pub dir: &'a Path,
    /// `None` makes every regular file a candidate
    pub template: Option<&'a Template>,
    pub policy: &'a RetentionPolicy,
    pub dry_run: bool,
}

/// Everything a run decided and did
#[derive(Debug)]
pub struct PruneOutcome {
    pub excluded: Vec<PathBuf>,
    pub selection: Selection,
    pub report: DeletionReport,
}

/// Run the whole pipeline. Configuration and directory problems are
/// returned before any file is touched; per-file deletion failures end up
/// in the report instead.
pub fn prune(options: &PruneOptions) -> Result<PruneOutcome> {
    options.policy.validate(options.template)?;

    let ScanResult {
        candidates,
        excluded,
    } = match options.template {
        Some(template) => collect_candidates(options.dir, template)?,
        None => collect_candidates(options.dir, &MatchAll)?,
    };

    let selection = select(candidates, options.policy);
    debug!(
        "Keeping {} files, removing {}",
        selection.keep.len(),
        selection.remove.len()
    );

    let report = Deleter::new(options.dry_run)
        .delete(selection.remove.iter().map(|ranked| &ranked.candidate));

    Ok(PruneOutcome {
        excluded,
        selection,
        report,
    })
}
