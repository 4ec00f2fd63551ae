//! User interaction seam.
//!
//! The controller never touches the terminal directly; it is handed a
//! [`Prompter`] for each operation.

use zeroize::Zeroizing;

use crate::error::Result;

/// Blocking line-oriented user input.
pub trait Prompter {
    /// Ask a question and return the answer.
    fn ask(&mut self, text: &str) -> Result<String>;

    /// Ask for a value without echoing it.
    fn ask_hidden(&mut self, text: &str) -> Result<Zeroizing<String>>;

    /// Ask a yes/no question.
    fn confirm(&mut self, text: &str) -> Result<bool>;
}
