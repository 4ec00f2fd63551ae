//! Terminal prompter.
//!
//! Uses dialoguer widgets when stdin is a terminal. When input is piped,
//! questions are written to stderr and answers read line by line.

use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

use dialoguer::{Confirm, Input, Password};
use zeroize::Zeroizing;

use crate::core::prompt::Prompter;
use crate::error::{Error, PromptError, Result};

const REASK: &str = "Please answer with a y(es) or n(o):";

/// Interpret a yes/no answer; `None` means ask again.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompter over stdin/stderr.
pub struct TerminalPrompter<B> {
    input: B,
    interactive: bool,
}

impl TerminalPrompter<StdinLock<'static>> {
    /// Prompt on the process's stdin, interactively when it is a terminal.
    pub fn stdin() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            interactive,
        }
    }
}

impl<B: BufRead> TerminalPrompter<B> {
    /// Line-mode prompter over any reader.
    pub fn lines(input: B) -> Self {
        Self {
            input,
            interactive: false,
        }
    }

    fn read_line(&mut self, text: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{} ", text.trim())?;
        stderr.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed.into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

impl<B: BufRead> Prompter for TerminalPrompter<B> {
    fn ask(&mut self, text: &str) -> Result<String> {
        if !self.interactive {
            return self.read_line(text);
        }
        Ok(Input::<String>::new()
            .with_prompt(text.trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()?)
    }

    fn ask_hidden(&mut self, text: &str) -> Result<Zeroizing<String>> {
        if !self.interactive {
            return self.read_line(text).map(Zeroizing::new);
        }
        Ok(Zeroizing::new(
            Password::new()
                .with_prompt(text.trim_end_matches(':'))
                .allow_empty_password(true)
                .interact()?,
        ))
    }

    fn confirm(&mut self, text: &str) -> Result<bool> {
        if self.interactive {
            return Ok(Confirm::new().with_prompt(text).default(false).interact()?);
        }

        let mut question = format!("{} (y/n):", text.trim());
        loop {
            match self.read_line(&question) {
                Ok(answer) => match parse_yes_no(&answer) {
                    Some(yes) => return Ok(yes),
                    None => question = REASK.to_string(),
                },
                Err(Error::Prompt(PromptError::Closed)) => return Ok(false),
                Err(e) => return Err(e),
            }
        }
    }
}
