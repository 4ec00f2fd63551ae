//! Keysmith - named secrets in the macOS keychain, via the `security` tool.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── get           # Read a secret (offers to create it)
//! │   ├── config        # Set or replace a secret
//! │   ├── rm            # Delete a secret
//! │   ├── prompt        # Terminal prompter
//! │   ├── output        # Styled terminal output
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── codec         # `security` dump parsing, protocol codes
//!     ├── identity      # Service string -> secret identity
//!     ├── keychain      # find / add / delete over the tool
//!     ├── runner        # Process execution
//!     ├── controller    # get / config / delete workflows
//!     ├── prompt        # Prompter trait
//!     └── config        # config.toml settings
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::codec::{Dump, Field};
pub use crate::core::controller::{Controller, Outcome};
pub use crate::core::identity::{classify, SecretIdentity, SecretKind};
pub use crate::core::keychain::{Keychain, Lookup, SecretRecord};
pub use crate::core::prompt::Prompter;
pub use crate::core::runner::{Runner, SystemRunner, ToolOutput};
pub use crate::error::{Error, KeychainError, Result};
