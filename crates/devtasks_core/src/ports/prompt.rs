//! Blocking user prompts.
//!
//! Front-ends back these with real dialogs or terminal reads; tests use the
//! scripted variants below.

use std::collections::VecDeque;

/// Yes/no confirmation.
pub trait ConfirmationPort {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Free-text input.
pub trait TextInputPort {
    /// Returns `None` when the user cancels.
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String>;
}

/// Replays a fixed list of answers, then declines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirmation {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedConfirmation {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Messages shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmationPort for ScriptedConfirmation {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Replays a fixed list of responses, then cancels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTextInput {
    responses: VecDeque<Option<String>>,
    asked: Vec<(String, String)>,
}

impl ScriptedTextInput {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: responses
                .into_iter()
                .map(|response| response.map(Into::into))
                .collect(),
            asked: Vec::new(),
        }
    }

    /// `(message, initial)` pairs shown so far, in order.
    pub fn asked(&self) -> &[(String, String)] {
        &self.asked
    }
}

impl TextInputPort for ScriptedTextInput {
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String> {
        self.asked.push((message.to_string(), initial.to_string()));
        self.responses.pop_front().flatten()
    }
}
