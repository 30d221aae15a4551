//! Error types for the goldsync core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    MergeTool(#[from] MergeToolError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from strategy selection.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured strategy name matches no known strategy. Fatal at
    /// startup; there is no sensible fallback once a name was given.
    #[error("unrecognized reconcile strategy name: {0}")]
    UnknownStrategy(String),
}

// ---------------------------------------------------------------------------
// Prompt errors
// ---------------------------------------------------------------------------

/// Errors from the user-interaction backends.
///
/// Malformed *input* is never an error — it resolves to the default option.
/// These variants cover the channel itself failing.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading from or writing to the console failed.
    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The menu widget could not be driven.
    #[error("dialog widget error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

// ---------------------------------------------------------------------------
// Merge tool errors
// ---------------------------------------------------------------------------

/// Errors from the external merge tool invoker.
///
/// A nonzero exit from the tool is *not* an error — the invoker reports it
/// and resolves to a rejection. These variants cover failures to stage the
/// scratch files or to launch the tool at all.
#[derive(Debug, Error)]
pub enum MergeToolError {
    /// The merge tool binary was not found on `$PATH`.
    #[error("merge tool binary not found: {0}")]
    ProgramNotFound(String),

    /// Scratch-file or merged-output I/O failed.
    #[error("merge tool I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A confirmation or acknowledgment prompt failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

// ---------------------------------------------------------------------------
// Reconciliation errors
// ---------------------------------------------------------------------------

/// Errors from the reconciliation orchestrator.
///
/// A missing reference file is not represented here: it is a warning and an
/// empty baseline, not an error.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The reference file exists but could not be read.
    #[error("failed to read reference file '{path}': {source}")]
    ReadReference {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Replacing the reference file failed.
    #[error("failed to replace reference file '{path}': {source}")]
    WriteReference {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = ConfigError::UnknownStrategy("kdiff4".into());
        assert_eq!(
            err.to_string(),
            "unrecognized reconcile strategy name: kdiff4"
        );

        let err = MergeToolError::ProgramNotFound("kdiff3".into());
        assert_eq!(err.to_string(), "merge tool binary not found: kdiff3");

        let err = ReconcileError::ReadReference {
            path: PathBuf::from("/tmp/ref"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/ref"));
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let cfg_err = ConfigError::UnknownStrategy("bogus".into());
        let core_err: CoreError = cfg_err.into();
        assert!(matches!(core_err, CoreError::Config(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let core_err: CoreError = PromptError::Io(io_err).into();
        assert!(matches!(core_err, CoreError::Prompt(_)));
    }
}
