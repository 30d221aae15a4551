//! User interaction port: ask the user to pick one of N labeled options.
//!
//! The prompt is three-part (text before the content, the content itself,
//! and the question the user answers) plus an ordered option list whose
//! *last* entry is the default. Two interchangeable backends implement the
//! port: [`ConsolePrompt`] reads a line from stdin, [`DialogPrompt`] drives
//! a modal menu widget. [`AutoPrompt`] picks between them based on whether
//! an interactive terminal is attached.

mod console;
mod dialog;

use std::io::{self, IsTerminal};

use crate::errors::PromptError;

pub use console::ConsolePrompt;
pub use dialog::DialogPrompt;

/// One selectable option: a label and a single-character shortcut that
/// appears within the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub shortcut: char,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, shortcut: char) -> Self {
        Self {
            label: label.into(),
            shortcut,
        }
    }
}

/// A three-part prompt with its ordered option list.
///
/// `options` must hold at least one entry; the last one is the default and
/// is emphasized by the backends.
#[derive(Debug, Clone)]
pub struct MenuPrompt {
    pub before_text: String,
    pub after_text: String,
    pub body_text: String,
    pub options: Vec<MenuOption>,
}

/// A backend that can present a [`MenuPrompt`] and return the chosen label.
///
/// Implementations guarantee the returned label is one of the prompt's
/// options and never fail on malformed user input — anything unrecognized
/// resolves to the default (last) option.
pub trait PromptBackend {
    fn ask(&self, prompt: &MenuPrompt) -> Result<String, PromptError>;
}

/// Resolve raw user input against an option list.
///
/// Empty input picks the default (last) option; a single character picks the
/// option with that shortcut; anything longer must match a label exactly.
/// Unrecognized input falls back to the default. Returns `None` only for an
/// empty option list.
pub fn resolve_input<'a>(input: &str, options: &'a [MenuOption]) -> Option<&'a MenuOption> {
    let fallback = options.last();

    if input.is_empty() {
        return fallback;
    }

    let mut chars = input.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return options.iter().find(|o| o.shortcut == first).or(fallback);
    }

    options.iter().find(|o| o.label == input).or(fallback)
}

/// Render an option label with its shortcut bracketed, e.g. `[k]diff3`.
fn bracket_shortcut(option: &MenuOption) -> String {
    match option.label.find(option.shortcut) {
        Some(index) => format!(
            "{}[{}]{}",
            &option.label[..index],
            option.shortcut,
            &option.label[index + option.shortcut.len_utf8()..]
        ),
        None => option.label.clone(),
    }
}

/// Backend selector: the console when stdin is an interactive terminal,
/// otherwise a one-line notice and the modal menu widget.
pub struct AutoPrompt;

impl PromptBackend for AutoPrompt {
    fn ask(&self, prompt: &MenuPrompt) -> Result<String, PromptError> {
        if io::stdin().is_terminal() {
            ConsolePrompt.ask(prompt)
        } else {
            println!("System console not available; using a menu prompt to retrieve input instead.");
            DialogPrompt.ask(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<MenuOption> {
        vec![
            MenuOption::new("kdiff3", 'k'),
            MenuOption::new("diff", 'd'),
            MenuOption::new("yes", 'y'),
            MenuOption::new("no", 'n'),
        ]
    }

    #[test]
    fn test_empty_input_picks_default() {
        let opts = options();
        assert_eq!(resolve_input("", &opts).map(|o| o.label.as_str()), Some("no"));
    }

    #[test]
    fn test_shortcut_picks_matching_option() {
        let opts = options();
        assert_eq!(resolve_input("k", &opts).map(|o| o.label.as_str()), Some("kdiff3"));
        assert_eq!(resolve_input("y", &opts).map(|o| o.label.as_str()), Some("yes"));
    }

    #[test]
    fn test_unknown_shortcut_picks_default() {
        let opts = options();
        assert_eq!(resolve_input("z", &opts).map(|o| o.label.as_str()), Some("no"));
    }

    #[test]
    fn test_full_label_picks_matching_option() {
        let opts = options();
        assert_eq!(resolve_input("diff", &opts).map(|o| o.label.as_str()), Some("diff"));
    }

    #[test]
    fn test_garbage_input_picks_default() {
        let opts = options();
        assert_eq!(resolve_input("banana", &opts).map(|o| o.label.as_str()), Some("no"));
        assert_eq!(resolve_input("Yes", &opts).map(|o| o.label.as_str()), Some("no"));
    }

    #[test]
    fn test_empty_option_list_resolves_to_none() {
        assert!(resolve_input("anything", &[]).is_none());
    }

    #[test]
    fn test_bracket_shortcut_wraps_first_occurrence() {
        assert_eq!(bracket_shortcut(&MenuOption::new("kdiff3", 'k')), "[k]diff3");
        assert_eq!(bracket_shortcut(&MenuOption::new("observations", 'o')), "[o]bservations");
        assert_eq!(bracket_shortcut(&MenuOption::new("no", 'n')), "[n]o");
        // A shortcut absent from the label is left unrendered.
        assert_eq!(bracket_shortcut(&MenuOption::new("yes", 'x')), "yes");
    }
}
