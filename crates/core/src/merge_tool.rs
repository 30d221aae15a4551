//! External visual merge tool invoker.
//!
//! Stages the reference and current observations in uniquely named scratch
//! files, runs the tool against them, and recovers the merged result (or the
//! failure). Scratch files are owned by the invocation and removed on every
//! exit path, including panics, by `tempfile`'s drop handling.

use std::io::{self, Write};
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::diff::split_lines;
use crate::errors::MergeToolError;
use crate::prompt::{MenuOption, MenuPrompt, PromptBackend};
use crate::strategy::Outcome;

/// The merge tool invoked when none is named explicitly.
pub const DEFAULT_MERGE_PROGRAM: &str = "kdiff3";

/// An external merge tool, identified by its program name.
#[derive(Debug, Clone)]
pub struct MergeTool {
    program: String,
}

impl MergeTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run one merge attempt and return its outcome.
    ///
    /// With `no_save` set the tool is only ever opened for inspection (after
    /// a yes/no confirmation, default no) and the outcome is always
    /// `Rejected`: a failed test run never produces a new reference. In
    /// merge mode, exit code 0 yields `Accepted` with the merged lines and
    /// anything else yields `Rejected`; either way the user acknowledges a
    /// one-line status message before this returns. Tool failures are not
    /// retried.
    pub fn merge(
        &self,
        prompt: &dyn PromptBackend,
        test_name: &str,
        reference_lines: &[String],
        current_lines: &[String],
        no_save: Option<&str>,
    ) -> Result<Outcome, MergeToolError> {
        let current_file = scratch_file("curr", current_lines)?;
        let reference_file = scratch_file("ref", reference_lines)?;

        if let Some(reason) = no_save {
            let answer = prompt.ask(&MenuPrompt {
                before_text: format!("Encountered failures while running test {test_name}:"),
                after_text: format!("Still want to start {}?", self.program),
                body_text: reason.to_string(),
                options: vec![MenuOption::new("yes", 'y'), MenuOption::new("no", 'n')],
            })?;
            if answer != "yes" {
                return Ok(Outcome::Rejected);
            }

            // View-only invocation: there is no save path when the run
            // already failed.
            let mut command = Command::new(&self.program);
            command
                .arg(reference_file.path())
                .arg("--L1")
                .arg(format!("{test_name}_REFERENCE"))
                .arg(current_file.path())
                .arg("--L2")
                .arg(format!("{test_name}_CURRENT"));
            self.run(&mut command)?;
            return Ok(Outcome::Rejected);
        }

        let merged_file = scratch_file("merged", &[])?;
        let mut command = Command::new(&self.program);
        command
            .arg("-m")
            .arg(reference_file.path())
            .arg("--L1")
            .arg(format!("{test_name}_REFERENCE"))
            .arg(current_file.path())
            .arg("--L2")
            .arg(format!("{test_name}_CURRENT"))
            .arg("-o")
            .arg(merged_file.path());

        let code = self.run(&mut command)?;
        let (message, outcome) = if code == 0 {
            let merged = std::fs::read_to_string(merged_file.path())?;
            info!(test = test_name, "merge tool produced a merged reference");
            (
                "Merge successful; saving a new reference file.",
                Outcome::Accepted(split_lines(&merged)),
            )
        } else {
            warn!(test = test_name, exit_code = code, "merge tool exited with failure");
            (
                "Merge unsuccessful; not saving a new reference file.",
                Outcome::Rejected,
            )
        };

        prompt.ask(&MenuPrompt {
            before_text: message.to_string(),
            after_text: String::new(),
            body_text: String::new(),
            options: vec![MenuOption::new("continue", 'c')],
        })?;

        Ok(outcome)
    }

    /// Run the tool with inherited stdio, blocking until it exits.
    fn run(&self, command: &mut Command) -> Result<i32, MergeToolError> {
        debug!(program = %self.program, "invoking merge tool");
        let status = command.status().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                MergeToolError::ProgramNotFound(self.program.clone())
            } else {
                MergeToolError::Io(e)
            }
        })?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Write lines to a fresh scratch file with a flavor-specific suffix.
///
/// The random infix avoids collisions between reconciliations running
/// concurrently for different tests in a shared temp directory.
fn scratch_file(flavor: &str, lines: &[String]) -> Result<NamedTempFile, MergeToolError> {
    let mut file = tempfile::Builder::new()
        .prefix("goldsync_")
        .suffix(&format!(".{flavor}"))
        .tempfile()?;
    file.write_all(lines.concat().as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PromptError;

    struct NoPrompts;

    impl PromptBackend for NoPrompts {
        fn ask(&self, _prompt: &MenuPrompt) -> Result<String, PromptError> {
            panic!("no prompt expected in this scenario");
        }
    }

    #[test]
    fn test_missing_program_is_a_typed_error() {
        let tool = MergeTool::new("goldsync-no-such-merge-tool");
        let result = tool.merge(
            &NoPrompts,
            "t",
            &["a\n".to_string()],
            &["b\n".to_string()],
            None,
        );
        assert!(matches!(result, Err(MergeToolError::ProgramNotFound(_))));
    }

    #[test]
    fn test_scratch_file_holds_content_and_flavor() {
        let file = scratch_file("curr", &["a\n".to_string(), "b\n".to_string()]).unwrap();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("goldsync_"));
        assert!(name.ends_with(".curr"));
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "a\nb\n");

        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
    }
}
