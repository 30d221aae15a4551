//! Reconciliation orchestrator.
//!
//! Loads the reference observations, computes the diff against the current
//! ones, short-circuits when they match, and otherwise delegates the
//! decision to the configured strategy. An accepted outcome replaces the
//! reference file — unless saving is suppressed because the test run
//! already failed for other reasons.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::diff::{split_lines, unified_diff};
use crate::errors::{CoreError, ReconcileError};
use crate::strategy::{Outcome, Strategy};
use crate::style;

/// One reconciliation: which test, against which reference, with which
/// freshly captured lines. Immutable for the duration of the call.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Test name, used in prompts and messages.
    pub test_name: String,
    /// Path of the stored reference observation file.
    pub reference_path: PathBuf,
    /// Current observation lines, endings preserved.
    pub current_lines: Vec<String>,
    /// When set, the test run already failed and no outcome may be
    /// persisted; the string says why.
    pub no_save: Option<String>,
}

/// Reconcile current observations against the stored reference.
///
/// Returns `true` when the reference is consistent afterwards (no
/// differences, or the strategy accepted them) and `false` when the
/// differences remain unresolved and the test should fail.
pub fn reconcile(strategy: &Strategy, request: &ReconcileRequest) -> Result<bool, CoreError> {
    let reference_lines = read_reference(&request.test_name, &request.reference_path)?;

    let diff = unified_diff(&reference_lines, &request.current_lines);
    if diff.is_empty() {
        debug!(test = %request.test_name, "observations match the reference");
        return Ok(true);
    }

    let outcome = strategy.resolve(
        &request.test_name,
        &reference_lines,
        &request.current_lines,
        &diff,
        request.no_save.as_deref(),
    )?;

    match outcome {
        Outcome::Accepted(lines) => {
            if let Some(reason) = &request.no_save {
                println!(
                    "{}",
                    style::header(&format!(
                        "Not saving reference observation file for {}: {}",
                        request.test_name, reason
                    ))
                );
                info!(test = %request.test_name, reason = %reason, "differences accepted but not persisted");
            } else {
                println!(
                    "{}",
                    style::header(&format!(
                        "Saving updated reference observation file for {}",
                        request.test_name
                    ))
                );
                commit_reference(&request.reference_path, &lines)?;
                info!(test = %request.test_name, path = %request.reference_path.display(), "reference replaced");
            }
            Ok(true)
        }
        Outcome::Rejected => Ok(false),
    }
}

/// Read the reference file with line endings preserved.
///
/// A missing file is a warning, not an error: the reference is treated as
/// empty so that first runs of a test present every observation as new.
fn read_reference(test_name: &str, path: &Path) -> Result<Vec<String>, ReconcileError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(split_lines(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!(
                "{}",
                style::warn(&format!(
                    "No reference observation file found for {}: {}",
                    test_name,
                    path.display()
                ))
            );
            warn!(test = test_name, path = %path.display(), "reference file missing; using empty baseline");
            Ok(Vec::new())
        }
        Err(e) => Err(ReconcileError::ReadReference {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replace the reference file with the accepted lines.
///
/// The old file is deleted only once the full new content is in hand, then
/// the new content is written in one shot.
fn commit_reference(path: &Path, lines: &[String]) -> Result<(), ReconcileError> {
    let content = lines.concat();
    if path.exists() {
        fs::remove_file(path).map_err(|e| ReconcileError::WriteReference {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| ReconcileError::WriteReference {
        path: path.to_path_buf(),
        source: e,
    })
}
