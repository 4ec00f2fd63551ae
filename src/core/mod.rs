//! Core library components.
//!
//! Everything needed to talk to the keychain through the `security` tool,
//! independent of the terminal.

pub mod codec;
pub mod config;
pub mod constants;
pub mod controller;
pub mod identity;
pub mod keychain;
pub mod prompt;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;
