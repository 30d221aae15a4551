//! Interactive review menu shared by the console and dialog strategies.
//!
//! The menu is an explicit finite-state machine: each viewing state shows
//! one facet of the reconciliation (raw observations, the unified diff, the
//! suppress-save reason) and routes to the others or to a terminal decision.
//! The route table is data; the two interactive strategies differ only in
//! the prompt backend injected here.

use tracing::debug;

use crate::diff::render_diff;
use crate::errors::CoreError;
use crate::merge_tool::MergeTool;
use crate::prompt::{MenuOption, MenuPrompt, PromptBackend};
use crate::style;

use super::Outcome;

/// States of the review menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    /// Show the raw current observations.
    Observations,
    /// Show the unified diff.
    Diff,
    /// Show why saving is suppressed.
    Errors,
    /// Terminal: hand over to the external merge tool.
    Merge,
    /// Terminal: accept the current observations.
    Yes,
    /// Terminal: reject the differences.
    No,
    /// Terminal: leave without saving (suppressed mode).
    Continue,
}

/// One menu entry: the label/shortcut presented and the state it routes to.
struct Route {
    label: String,
    shortcut: char,
    next: MenuState,
}

fn route(label: &str, shortcut: char, next: MenuState) -> Route {
    Route {
        label: label.to_string(),
        shortcut,
        next,
    }
}

/// The option set for a viewing state. Two fixed sets per state depending on
/// whether saving is suppressed; the last entry is the default. Terminal
/// states present no options.
fn routes(state: MenuState, suppressed: bool, tool_name: &str) -> Vec<Route> {
    let merge = Route {
        label: tool_name.to_string(),
        shortcut: tool_name.chars().next().unwrap_or('m'),
        next: MenuState::Merge,
    };
    match state {
        MenuState::Observations if suppressed => vec![
            merge,
            route("diff", 'd', MenuState::Diff),
            route("errors", 'e', MenuState::Errors),
            route("continue", 'c', MenuState::Continue),
        ],
        MenuState::Observations => vec![
            merge,
            route("diff", 'd', MenuState::Diff),
            route("yes", 'y', MenuState::Yes),
            route("no", 'n', MenuState::No),
        ],
        MenuState::Diff if suppressed => vec![
            merge,
            route("observations", 'o', MenuState::Observations),
            route("errors", 'e', MenuState::Errors),
            route("continue", 'c', MenuState::Continue),
        ],
        MenuState::Diff => vec![
            merge,
            route("observations", 'o', MenuState::Observations),
            route("yes", 'y', MenuState::Yes),
            route("no", 'n', MenuState::No),
        ],
        MenuState::Errors => vec![
            merge,
            route("observations", 'o', MenuState::Observations),
            route("diff", 'd', MenuState::Diff),
            route("continue", 'c', MenuState::Continue),
        ],
        MenuState::Merge | MenuState::Yes | MenuState::No | MenuState::Continue => Vec::new(),
    }
}

/// Drive the review menu until a terminal state produces an outcome.
///
/// The initial state is `Errors` when saving is suppressed, `Diff`
/// otherwise.
pub(crate) fn run(
    backend: &dyn PromptBackend,
    tool: &MergeTool,
    test_name: &str,
    reference_lines: &[String],
    current_lines: &[String],
    diff: &[String],
    no_save: Option<&str>,
) -> Result<Outcome, CoreError> {
    let suppressed = no_save.is_some();
    let mut state = if suppressed {
        MenuState::Errors
    } else {
        MenuState::Diff
    };

    loop {
        debug!(?state, test = test_name, "presenting review menu");
        let (before, body) = match state {
            MenuState::Observations => (
                format!("Observations are shown for {test_name}:"),
                current_lines.concat(),
            ),
            MenuState::Diff => (
                format!("Differences in observations are shown for {test_name}:"),
                render_diff(diff),
            ),
            MenuState::Errors => (
                format!("Errors are shown for {test_name}:"),
                no_save.unwrap_or_default().to_string(),
            ),
            MenuState::Merge => {
                return tool
                    .merge(backend, test_name, reference_lines, current_lines, no_save)
                    .map_err(Into::into);
            }
            MenuState::Yes => {
                println!(
                    "{}",
                    style::header(&format!("Accepting differences for {test_name}"))
                );
                return Ok(Outcome::Accepted(current_lines.to_vec()));
            }
            MenuState::No => {
                println!(
                    "{}",
                    style::header(&format!("Rejecting differences for {test_name}"))
                );
                return Ok(Outcome::Rejected);
            }
            MenuState::Continue => return Ok(Outcome::Rejected),
        };

        let after = if suppressed {
            "Saving not available due to errors in the test".to_string()
        } else {
            format!("Save new set of observations with these differences for {test_name}?")
        };

        let menu = routes(state, suppressed, tool.program());
        let options: Vec<MenuOption> = menu
            .iter()
            .map(|r| MenuOption::new(&r.label, r.shortcut))
            .collect();
        let answer = backend.ask(&MenuPrompt {
            before_text: before,
            after_text: after,
            body_text: body,
            options,
        })?;

        state = match menu.iter().find(|r| r.label == answer) {
            Some(chosen) => chosen.next,
            // Backends only return listed labels; anything else resolves to
            // the default route.
            None => menu.last().map(|r| r.next).unwrap_or(MenuState::Continue),
        };
    }
}
