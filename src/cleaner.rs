use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

use crate::scanner::{CandidateItem, CandidateKind};

/// A single candidate that could not be removed, with the reason.
#[derive(Debug)]
pub struct ReclaimFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Result of one reclaim pass. `failed_count()` is the contract figure;
/// `failures` carries the paths and errors behind it for display.
#[derive(Debug, Default)]
pub struct ReclaimOutcome {
    pub attempted: usize,
    pub reclaimed_bytes: u64,
    pub failures: Vec<ReclaimFailure>,
}

impl ReclaimOutcome {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn removed_count(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

/// Delete every candidate in the order given. Each removal is isolated: a
/// failure (already gone, locked, permission denied) is counted and the pass
/// moves on. The batch never aborts early and this call never fails.
///
/// Destructive and irreversible; confirmation belongs to the caller.
pub fn reclaim(items: &[CandidateItem]) -> ReclaimOutcome {
    let mut outcome = ReclaimOutcome {
        attempted: items.len(),
        ..ReclaimOutcome::default()
    };

    for item in items {
        match remove_item(item) {
            Ok(()) => {
                debug!("removed {}", item.path.display());
                outcome.reclaimed_bytes += item.size_bytes;
            }
            Err(error) => {
                warn!("failed to remove {}: {error}", item.path.display());
                outcome.failures.push(ReclaimFailure {
                    path: item.path.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Removal is dispatched on the kind recorded at scan time, not a fresh stat,
/// so an item that vanished in between surfaces as a counted failure.
fn remove_item(item: &CandidateItem) -> io::Result<()> {
    match item.kind {
        CandidateKind::File => fs::remove_file(&item.path),
        // A link to a directory deletes as a directory on Windows.
        CandidateKind::SymbolicLink => {
            fs::remove_file(&item.path).or_else(|_| fs::remove_dir(&item.path))
        }
        // Recursive removal tolerates a directory that gained content since
        // the scan recorded it as empty.
        CandidateKind::EmptyDirectory => fs::remove_dir_all(&item.path),
    }
}
