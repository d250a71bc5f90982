//! Terminal-backed prompt ports.

use devtasks_core::{ConfirmationPort, TextInputPort};
use std::io::{self, BufRead, Write};

/// Asks `[y/N]` on stdout and reads one line from stdin.
pub struct StdinConfirmation;

impl ConfirmationPort for StdinConfirmation {
    fn confirm(&mut self, message: &str) -> bool {
        read_line(&format!("{message} [y/N] ")).is_some_and(|answer| {
            matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        })
    }
}

/// Used by `--yes`.
pub struct AlwaysConfirm;

impl ConfirmationPort for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Reads a replacement title; an empty line keeps the current title and
/// end-of-input cancels.
pub struct StdinTextInput;

impl TextInputPort for StdinTextInput {
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String> {
        let answer = read_line(&format!("{message} [{initial}] "))?;
        if answer.trim().is_empty() {
            Some(initial.to_string())
        } else {
            Some(answer)
        }
    }
}

fn read_line(prompt: &str) -> Option<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}").ok()?;
    stdout.flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}
