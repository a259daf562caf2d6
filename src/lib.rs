//! prunefiles - Delete old files by name pattern
//!
//! prunefiles lists one directory, matches each file name against a template
//! such as `app-{seq:d}.log`, ranks the matching files by one of the
//! extracted fields, and deletes everything beyond the retention thresholds
//! (keep the newest N files, and/or keep files while their total size fits a
//! budget). Files that don't match the template are never touched.
//!
//! ## Pipeline
//!
//! - [`template`]: compile the template, match names, extract typed fields
//! - [`scanner`]: list the directory and build candidates
//! - [`retention`]: rank candidates and split them into keep / remove
//! - [`deleter`]: remove files, one failure never stops the batch

pub mod deleter;
pub mod error;
pub mod prune;
pub mod retention;
pub mod scanner;
pub mod size;
pub mod template;

// Re-export commonly used items
pub use deleter::{DeletionFailure, DeletionOutcome, DeletionReport, Deleter};
pub use error::{Error, Result};
pub use prune::{prune, PruneOptions, PruneOutcome};
pub use retention::{select, KeepReason, Ranked, RemoveReason, RetentionPolicy, Selection};
pub use scanner::{collect_candidates, Candidate, ScanResult};
pub use size::{display_size, parse_size};
pub use template::{
    extract_fields, FieldKind, FieldValue, Fields, MatchAll, NameMatcher, Template, TemplateError,
};
