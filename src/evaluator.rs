use crate::command::{ExitCode, Invocation, ProcessRunner};
use crate::diagnostic::{Classifier, DiagnosticReport};
use crate::error::JexError;
use crate::external::SystemRunner;
use crate::trace::TraceStore;
use anyhow::{Context, Result};
use std::io::Write;

/// Terminal state of one evaluation.
#[derive(Debug)]
pub enum Outcome {
    /// Ansible exited 0; holds its output unchanged.
    Success(Vec<u8>),
    /// The executable could not be located. Nothing was run and no trace was written.
    ToolNotFound(JexError),
    /// Ansible exited non-zero.
    Failed {
        report: DiagnosticReport,
        output: Vec<u8>,
    },
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Success(_) => 0,
            Outcome::ToolNotFound(_) | Outcome::Failed { .. } => 1,
        }
    }
}

/// Runs one [`Invocation`] and reports the result.
///
/// Example
/// ```no_run
/// use jex::Evaluator;
/// use jex::command::Invocation;
/// use jex::config::ToolConfig;
///
/// let evaluator = Evaluator::system().unwrap();
/// let inv = Invocation::for_expression(&ToolConfig::default(), "{{ [1, 2] | reverse }}", &[]);
/// let code = evaluator
///     .run(&inv, &mut std::io::stdout(), &mut std::io::stderr())
///     .unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Evaluator {
    runner: Box<dyn ProcessRunner>,
    classifier: Classifier,
    traces: TraceStore,
}

impl Evaluator {
    /// Create an evaluator with a custom process runner and trace location.
    pub fn new(runner: Box<dyn ProcessRunner>, traces: TraceStore) -> Result<Self> {
        Ok(Self {
            runner,
            classifier: Classifier::builtin()?,
            traces,
        })
    }

    /// Evaluator backed by real child processes and the system temp directory.
    pub fn system() -> Result<Self> {
        Self::new(Box::new(SystemRunner::default()), TraceStore::default())
    }

    /// Execute the invocation and classify a failure. Writes the trace file on failure.
    pub fn evaluate(&self, invocation: &Invocation) -> Result<Outcome> {
        let execution = match self.runner.execute(invocation) {
            Ok(execution) => execution,
            Err(e @ JexError::ToolNotFound { .. }) => return Ok(Outcome::ToolNotFound(e)),
            Err(e) => return Err(e).context("could not execute ansible"),
        };

        if execution.success() {
            return Ok(Outcome::Success(execution.output));
        }
        tracing::info!(exit_code = execution.exit_code, "ansible failed");

        let classification = self.classifier.classify(&execution.text());
        let trace_path = match self.traces.write(&execution.output) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    dir = %self.traces.dir().display(),
                    "could not save trace"
                );
                None
            }
        };
        Ok(Outcome::Failed {
            report: DiagnosticReport {
                classification,
                trace_path,
            },
            output: execution.output,
        })
    }

    /// Evaluate and print: output to `stdout` on success, everything else to `stderr`.
    ///
    /// Returns the process exit code for the run.
    pub fn run(
        &self,
        invocation: &Invocation,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<ExitCode> {
        writeln!(stderr, "--- Running command: {}", invocation)?;
        let outcome = self.evaluate(invocation)?;
        match &outcome {
            Outcome::Success(output) => {
                stdout.write_all(output)?;
                stdout.flush()?;
            }
            Outcome::ToolNotFound(e) => writeln!(stderr, "\nError: {}", e)?,
            Outcome::Failed { report, output } => {
                report.render(stderr)?;
                if report.trace_path.is_none() {
                    stderr.write_all(output)?;
                }
            }
        }
        Ok(outcome.exit_code())
    }
}
