//! End-to-end tests for the reconciliation orchestrator against real files.
//!
//! These exercise the non-interactive strategies through `reconcile` with
//! real reference files in temp directories, covering the persistence and
//! suppress-save rules.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use goldsync_core::reconcile::{reconcile, ReconcileRequest};
use goldsync_core::strategy::Strategy;

// ===========================================================================
// Helpers
// ===========================================================================

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

fn write_reference(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("my_test.ref");
    fs::write(&path, content).unwrap();
    path
}

fn request(reference_path: &Path, current: &[&str], no_save: Option<&str>) -> ReconcileRequest {
    ReconcileRequest {
        test_name: "my_test".to_string(),
        reference_path: reference_path.to_path_buf(),
        current_lines: lines(current),
        no_save: no_save.map(str::to_string),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn identical_content_reconciles_without_consulting_the_strategy() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb\n");

    // Abort would reject any difference, so a `true` here proves the
    // strategy was never asked.
    let passed = reconcile(&Strategy::Abort, &request(&reference, &["a\n", "b\n"], None)).unwrap();
    assert!(passed);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nb\n");
}

#[test]
fn accept_persists_the_current_lines() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb\n");

    let passed = reconcile(&Strategy::Accept, &request(&reference, &["a\n", "c\n"], None)).unwrap();
    assert!(passed);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nc\n");
}

#[test]
fn abort_rejects_and_leaves_the_reference_untouched() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb\n");

    let passed = reconcile(&Strategy::Abort, &request(&reference, &["a\n", "c\n"], None)).unwrap();
    assert!(!passed);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nb\n");
}

#[test]
fn missing_reference_is_an_empty_baseline_and_accept_creates_it() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("my_test.ref");

    let passed = reconcile(&Strategy::Accept, &request(&reference, &["x\n"], None)).unwrap();
    assert!(passed);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "x\n");
}

#[test]
fn missing_reference_with_abort_fails_and_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("my_test.ref");

    let passed = reconcile(&Strategy::Abort, &request(&reference, &["x\n"], None)).unwrap();
    assert!(!passed);
    assert!(!reference.exists());
}

#[test]
fn suppressed_accept_passes_but_never_writes() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb\n");

    let passed = reconcile(
        &Strategy::Accept,
        &request(&reference, &["a\n", "c\n"], Some("crashed")),
    )
    .unwrap();
    assert!(passed);
    // Byte-for-byte untouched.
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nb\n");
}

#[test]
fn suppressed_accept_does_not_create_a_missing_reference() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("my_test.ref");

    let passed = reconcile(
        &Strategy::Accept,
        &request(&reference, &["x\n"], Some("crashed")),
    )
    .unwrap();
    assert!(passed);
    assert!(!reference.exists());
}

#[test]
fn accepted_content_round_trips_to_an_empty_diff() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb\n");

    assert!(reconcile(&Strategy::Accept, &request(&reference, &["a\n", "c\n"], None)).unwrap());

    // Reconciling the same content again finds no differences, so even
    // Abort passes.
    assert!(reconcile(&Strategy::Abort, &request(&reference, &["a\n", "c\n"], None)).unwrap());
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nc\n");
}

#[test]
fn preserves_content_without_a_final_newline() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(&dir, "a\nb");

    let passed = reconcile(&Strategy::Accept, &request(&reference, &["a\n", "c"], None)).unwrap();
    assert!(passed);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "a\nc");
}
