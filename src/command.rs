use crate::config::ToolConfig;
use crate::error::JexResult;
use std::borrow::Cow;
use std::fmt;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Fully assembled external-tool command line: program name followed by its arguments.
///
/// Built once from the user's expression and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Build the invocation that evaluates `expression` with the given tool configuration.
    ///
    /// The expression is embedded verbatim, without escaping, into a single
    /// `msg="<expression>"` argument. `extra` is appended after the fixed flags
    /// in its original order.
    pub fn for_expression(config: &ToolConfig, expression: &str, extra: &[String]) -> Self {
        let mut args = vec![
            config.host.clone(),
            "-i".to_string(),
            config.inventory.clone(),
            "-m".to_string(),
            config.module.clone(),
            "-a".to_string(),
            format!("{}=\"{}\"", config.message_key, expression),
        ];
        args.extend(extra.iter().cloned());
        Self {
            program: config.program.clone(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of one child process run: exit code plus stdout and stderr as one byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub exit_code: ExitCode,
    /// Raw bytes in the order the child wrote them.
    pub output: Vec<u8>,
}

impl Execution {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Output decoded for pattern matching; invalid UTF-8 is replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Capability to run an [`Invocation`] synchronously and capture its output.
///
/// Implementations return [`crate::error::JexError::ToolNotFound`] when the program cannot be
/// located. Any other exit, including non-zero ones, is an [`Execution`].
pub trait ProcessRunner {
    fn execute(&self, invocation: &Invocation) -> JexResult<Execution>;
}
