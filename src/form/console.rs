//! Terminal prompt that fills a `FormSession` one field at a time.
//!
//! Enter keeps the current value; `:reset` and `:quit` work at any prompt.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::{Field, FormSession};

const RESET_COMMAND: &str = ":reset";
const QUIT_COMMANDS: &[&str] = &[":quit", ":q"];

/// What the user asked for once the prompt returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Every field was visited; evaluate the form.
    Calculate,
    /// Clear the form and start again.
    Reset,
    /// Stop (explicitly or at end of input).
    Quit,
}

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Walk every field in form order, updating `form` as values are typed.
    pub fn fill(&mut self, form: &mut FormSession) -> Result<PromptAction> {
        for &field in Field::ALL {
            match form.get(field).filter(|v| !v.is_empty()) {
                Some(current) => write!(self.output, "{} [{current}]: ", prompt_label(field))?,
                None => write!(self.output, "{}: ", prompt_label(field))?,
            }
            self.output.flush().context("Failed to flush prompt")?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                return Ok(PromptAction::Quit);
            }

            match line.trim() {
                "" => {}
                RESET_COMMAND => return Ok(PromptAction::Reset),
                cmd if QUIT_COMMANDS.contains(&cmd) => return Ok(PromptAction::Quit),
                value => form.set(field, value),
            }
        }
        Ok(PromptAction::Calculate)
    }

    /// Print a block of text followed by a blank line.
    pub fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}\n").context("Failed to write result")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn prompt_label(field: Field) -> String {
    if field.is_optional() {
        format!("{} (optional)", field.label())
    } else {
        field.label().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
