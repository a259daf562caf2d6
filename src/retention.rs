//! Retention policy and the keep/remove selection.
//!
//! Candidates are ranked highest ordering value first. A candidate is kept
//! while it is within the keep-count, or, once the count is used up (or not
//! configured), while the cumulative size of everything kept so far plus
//! this file still fits the keep-size budget. The first file that does not
//! fit closes the size budget, so no older file is kept after it.

use crate::error::{Error, Result};
use crate::scanner::Candidate;
use crate::template::{FieldValue, Template};

use std::fmt;
use tracing::debug;

/// Retention rules for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    order_by: Option<String>,
    keep_count: Option<usize>,
    keep_size: Option<u64>,
}

impl RetentionPolicy {
    /// Build a policy. At least one of `keep_count` / `keep_size` is required,
    /// a policy without thresholds would delete everything.
    pub fn new(
        order_by: Option<String>,
        keep_count: Option<usize>,
        keep_size: Option<u64>,
    ) -> Result<Self> {
        if keep_count.is_none() && keep_size.is_none() {
            return Err(Error::NoThreshold);
        }

        Ok(RetentionPolicy {
            order_by,
            keep_count,
            keep_size,
        })
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn keep_count(&self) -> Option<usize> {
        self.keep_count
    }

    pub fn keep_size(&self) -> Option<u64> {
        self.keep_size
    }

    /// Check that the ordering field is declared by the template
    pub fn validate(&self, template: Option<&Template>) -> Result<()> {
        match (self.order_by(), template) {
            (None, _) => Ok(()),
            (Some(field), None) => Err(Error::OrderFieldWithoutTemplate(field.to_string())),
            (Some(field), Some(template)) if template.has_field(field) => Ok(()),
            (Some(field), Some(template)) => {
                let declared = template.field_names();
                Err(Error::UnknownOrderField {
                    field: field.to_string(),
                    available: if declared.is_empty() {
                        "no named fields".to_string()
                    } else {
                        declared.join(", ")
                    },
                })
            }
        }
    }
}

/// Why a candidate survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    Count,
    Size,
}

/// Why a candidate is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveReason {
    CountExceeded,
    SizeExceeded,
}

impl fmt::Display for RemoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveReason::CountExceeded => f.write_str("keep-count"),
            RemoveReason::SizeExceeded => f.write_str("keep-size"),
        }
    }
}

/// A candidate with its sort key and the reason for its fate
#[derive(Debug, Clone)]
pub struct Ranked<R> {
    pub candidate: Candidate,
    pub key: Option<FieldValue>,
    pub reason: R,
}

/// Outcome of applying a policy; both lists are highest-ranked first
#[derive(Debug, Default)]
pub struct Selection {
    pub keep: Vec<Ranked<KeepReason>>,
    pub remove: Vec<Ranked<RemoveReason>>,
}

impl Selection {
    pub fn kept_size(&self) -> u64 {
        self.keep.iter().map(|r| r.candidate.size).sum()
    }

    pub fn removed_size(&self) -> u64 {
        self.remove.iter().map(|r| r.candidate.size).sum()
    }
}

/// Rank `candidates` by the policy's ordering key and split them into keep and remove.
///
/// The sort is stable: candidates with equal keys keep their input order.
pub fn select(candidates: Vec<Candidate>, policy: &RetentionPolicy) -> Selection {
    let mut ranked: Vec<(Option<FieldValue>, Candidate)> = candidates
        .into_iter()
        .map(|candidate| (candidate.order_value(policy.order_by()), candidate))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let mut selection = Selection::default();
    let mut kept_count = 0usize;
    let mut kept_size = 0u64;
    let mut size_budget_open = true;

    for (key, candidate) in ranked {
        if policy.keep_count.is_some_and(|limit| kept_count < limit) {
            kept_count += 1;
            kept_size = kept_size.saturating_add(candidate.size);
            selection.keep.push(Ranked {
                candidate,
                key,
                reason: KeepReason::Count,
            });
            continue;
        }

        if let Some(budget) = policy.keep_size {
            let fits = kept_size < budget && kept_size.saturating_add(candidate.size) <= budget;
            if size_budget_open && fits {
                kept_size += candidate.size;
                selection.keep.push(Ranked {
                    candidate,
                    key,
                    reason: KeepReason::Size,
                });
                continue;
            }
            size_budget_open = false;
        }

        let reason = if policy.keep_size.is_some() {
            RemoveReason::SizeExceeded
        } else {
            RemoveReason::CountExceeded
        };
        debug!("Selected for removal by {}: {}", reason, candidate.name);
        selection.remove.push(Ranked {
            candidate,
            key,
            reason,
        });
    }

    selection
}
