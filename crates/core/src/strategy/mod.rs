//! Resolution strategies.
//!
//! A closed set of named strategies shares one operation: given the diff
//! between reference and current observations, decide the final content or
//! abstain. The interactive variants differ only in the prompt backend they
//! inject into the shared review menu.

mod interactive;

use tracing::info;

use crate::diff::render_diff;
use crate::errors::{ConfigError, CoreError};
use crate::merge_tool::{MergeTool, DEFAULT_MERGE_PROGRAM};
use crate::prompt::{AutoPrompt, DialogPrompt};
use crate::style;

/// The decision produced by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Persist these lines as the new reference.
    Accepted(Vec<String>),
    /// Keep the reference untouched; the test fails.
    Rejected,
}

/// Strategy name assumed when nothing is configured.
pub const DEFAULT_STRATEGY: &str = "console";

/// Named resolution strategies.
#[derive(Debug)]
pub enum Strategy {
    /// Accept the current observations unconditionally.
    Accept,
    /// Reject all differences unconditionally.
    Abort,
    /// Interactive review on the console, falling back to the menu widget
    /// when no terminal is attached.
    Console,
    /// Interactive review always on the menu widget.
    Dialog,
    /// Hand the decision to an external visual merge tool.
    Merge(MergeTool),
}

impl Strategy {
    /// Select a strategy by name.
    ///
    /// Recognized names: `accept`, `abort`, `console`, `dialog`, and the
    /// external merge tool identifier. Anything else is a fatal
    /// configuration error.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "accept" => Ok(Self::Accept),
            "abort" => Ok(Self::Abort),
            "console" => Ok(Self::Console),
            "dialog" => Ok(Self::Dialog),
            DEFAULT_MERGE_PROGRAM => Ok(Self::Merge(MergeTool::new(name))),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }

    /// Decide the outcome for one set of differing observations.
    pub fn resolve(
        &self,
        test_name: &str,
        reference_lines: &[String],
        current_lines: &[String],
        diff: &[String],
        no_save: Option<&str>,
    ) -> Result<Outcome, CoreError> {
        match self {
            Self::Accept => Ok(accept(test_name, current_lines, diff, no_save)),
            Self::Abort => Ok(abort(test_name, diff, no_save)),
            Self::Console => interactive::run(
                &AutoPrompt,
                &MergeTool::new(DEFAULT_MERGE_PROGRAM),
                test_name,
                reference_lines,
                current_lines,
                diff,
                no_save,
            ),
            Self::Dialog => interactive::run(
                &DialogPrompt,
                &MergeTool::new(DEFAULT_MERGE_PROGRAM),
                test_name,
                reference_lines,
                current_lines,
                diff,
                no_save,
            ),
            Self::Merge(tool) => tool
                .merge(&AutoPrompt, test_name, reference_lines, current_lines, no_save)
                .map_err(Into::into),
        }
    }
}

/// Accept-all: echo the diff for the audit trail, then take the current
/// lines. The orchestrator's no-save rule still prevents persistence for
/// failed runs.
fn accept(
    test_name: &str,
    current_lines: &[String],
    diff: &[String],
    no_save: Option<&str>,
) -> Outcome {
    if no_save.is_some() {
        println!(
            "{}",
            style::header(&format!(
                "Test {test_name} exited with failures; observations before failure:"
            ))
        );
        println!("{}", render_diff(diff));
    } else {
        println!("{}", style::header(&format!("Differences for {test_name}:")));
        println!("{}", render_diff(diff));
        println!(
            "{}",
            style::header(&format!(
                "Accepting (reconcile=accept) differences for {test_name}"
            ))
        );
    }
    info!(test = test_name, "accepting differences");
    Outcome::Accepted(current_lines.to_vec())
}

/// Abort-all: echo the diff (unless the run already failed) and reject.
fn abort(test_name: &str, diff: &[String], no_save: Option<&str>) -> Outcome {
    if no_save.is_none() {
        println!(
            "{}",
            style::header(&format!("Differences in observations for {test_name}:"))
        );
        println!("{}", render_diff(diff));
    }
    println!(
        "{}",
        style::header(&format!(
            "Aborting (reconcile=abort) due to differences for {test_name}"
        ))
    );
    info!(test = test_name, "aborting due to differences");
    Outcome::Rejected
}
