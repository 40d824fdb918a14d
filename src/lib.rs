//! Evaluate a single Jinja2 expression through Ansible's templating engine.
//!
//! The crate wraps `ansible localhost -m debug -a msg="<expression>"`: it builds
//! the invocation from command-line arguments, runs it as a child process and
//! relays the output. When Ansible fails, the captured text is matched against a
//! small table of known failure signatures so that the common "you need to
//! install X" case turns into a one-line instruction. The raw output is always
//! kept in a temporary file.
//!
//! The main entry point is [`Evaluator`]. The process is reached through the
//! [`command::ProcessRunner`] trait, so the reporting logic can be exercised
//! without Ansible installed.

pub mod cli;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod env;
pub mod error;
mod evaluator;
mod external;
pub mod logging;
pub mod trace;

/// Re-export of the runner that drives one evaluation end to end.
///
/// See [`Evaluator`] for the high-level API.
pub use evaluator::{Evaluator, Outcome};
pub use external::{SystemRunner, find_command_path};
