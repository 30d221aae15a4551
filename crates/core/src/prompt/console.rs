//! Console prompt backend: print the prompt, read one line from stdin.

use std::io::{self, BufRead, Write};

use super::{bracket_shortcut, resolve_input, MenuPrompt, PromptBackend};
use crate::errors::PromptError;
use crate::style;

/// Prompt backend for an attached interactive terminal.
pub struct ConsolePrompt;

impl PromptBackend for ConsolePrompt {
    fn ask(&self, prompt: &MenuPrompt) -> Result<String, PromptError> {
        let mut rendered: Vec<String> = prompt.options.iter().map(bracket_shortcut).collect();
        // The default option is the last one; emphasize it.
        if let Some(last) = rendered.last_mut() {
            let emphasized = style::header(last);
            *last = emphasized;
        }

        // When only the before text is present, promote it to the input
        // prompt: that is the line the user answers on.
        let (before, after) = if !prompt.before_text.is_empty() && prompt.after_text.is_empty() {
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
        print!("{} ({}): ", style::header(after), rendered.join(" | "));
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        let chosen = resolve_input(line.trim_end(), &prompt.options);
        Ok(chosen.map(|option| option.label.clone()).unwrap_or_default())
    }
}
