//! Prompter fed from a fixed list of answers.

use super::{PromptError, PromptResult, Prompter};
use std::collections::VecDeque;

/// Replays canned answers in order. Used by tests and non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<(String, bool)>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Labels shown so far, with their secure flag.
    pub fn asked(&self) -> &[(String, bool)] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, label: &str, secure: bool) -> PromptResult<String> {
        self.asked.push((label.to_string(), secure));
        self.answers.pop_front().ok_or(PromptError::Closed)
    }
}
