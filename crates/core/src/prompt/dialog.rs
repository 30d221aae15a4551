//! Modal menu prompt backend.
//!
//! The menu widget is consumed only through its "pick one of N options"
//! contract; dismissing the widget resolves to the default option, so this
//! backend cannot fail on user input either.

use dialoguer::Select;

use super::{MenuPrompt, PromptBackend};
use crate::errors::PromptError;
use crate::style;

/// Prompt backend that presents the options as a modal selection menu.
pub struct DialogPrompt;

impl PromptBackend for DialogPrompt {
    fn ask(&self, prompt: &MenuPrompt) -> Result<String, PromptError> {
        let Some(default_index) = prompt.options.len().checked_sub(1) else {
            return Ok(String::new());
        };

        // Same promotion rule as the console backend: a lone before text
        // becomes the question line.
        let (before, title) = if !prompt.before_text.is_empty() && prompt.after_text.is_empty() {
            ("", prompt.before_text.as_str())
        } else {
            (prompt.before_text.as_str(), prompt.after_text.as_str())
        };

        if !before.is_empty() {
            println!("{}", style::header(before));
        }
        if !prompt.body_text.is_empty() {
            println!("{}", prompt.body_text);
        }

        let labels: Vec<&str> = prompt.options.iter().map(|o| o.label.as_str()).collect();
        let selection = Select::new()
            .with_prompt(title)
            .items(&labels)
            .default(default_index)
            .interact_opt()?;

        let index = selection.unwrap_or(default_index);
        Ok(prompt.options[index].label.clone())
    }
}
