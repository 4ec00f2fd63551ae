//! Scripted fakes for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::Path;

use zeroize::Zeroizing;

use crate::core::prompt::Prompter;
use crate::core::runner::{Runner, ToolOutput};
use crate::error::Result;

/// Replays queued tool results and records every argument vector.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<io::Result<ToolOutput>>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, code: i32, output: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(ToolOutput::new(code, output)));
        self
    }

    pub fn fail_spawn(self) -> Self {
        self.responses.borrow_mut().push_back(Err(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        )));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Calls whose subcommand starts with `prefix` (e.g. `"add-"`).
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c[0].starts_with(prefix))
            .count()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, _program: &Path, args: &[String]) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected security call: {:?}", args))
    }
}

/// Answers prompts from queues and records the questions asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    secrets: VecDeque<String>,
    confirms: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: &str) -> Self {
        self.answers.push_back(text.to_string());
        self
    }

    pub fn secret(mut self, text: &str) -> Self {
        self.secrets.push_back(text.to_string());
        self
    }

    pub fn confirm_with(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }

    /// Number of yes/no questions asked.
    pub fn confirmations(&self) -> usize {
        self.asked.iter().filter(|q| q.starts_with("confirm:")).count()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, text: &str) -> Result<String> {
        self.asked.push(format!("ask:{text}"));
        Ok(self
            .answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected question: {text}")))
    }

    fn ask_hidden(&mut self, text: &str) -> Result<Zeroizing<String>> {
        self.asked.push(format!("hidden:{text}"));
        Ok(Zeroizing::new(
            self.secrets
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected secret prompt: {text}")),
        ))
    }

    fn confirm(&mut self, text: &str) -> Result<bool> {
        self.asked.push(format!("confirm:{text}"));
        Ok(self
            .confirms
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected confirmation: {text}")))
    }
}
