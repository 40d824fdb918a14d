//! Command-line surface: `jex "<expression>" [extra-args...]`.

use crate::error::JexError;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::path::Path;

#[derive(FromArgs, Debug, PartialEq, Eq)]
/// Evaluate a Jinja2 expression with Ansible's templating engine.
pub struct Args {
    #[argh(positional)]
    /// the Jinja2 expression, enclosed in double quotes
    pub expression: String,

    #[argh(positional, greedy)]
    /// extra arguments handed to ansible unchanged, e.g. -e name=value
    pub extra: Vec<String>,
}

/// What the process should do for a given argument list.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// Print usage and exit 0. Requested explicitly or implied by missing arguments.
    Help,
    Evaluate(Args),
}

/// Parse the arguments that follow the program name.
///
/// No arguments, or `-h`/`--help` as the first one, is a help request. Anything
/// else is taken as the expression plus pass-through arguments, verbatim.
pub fn parse(command_name: &str, args: &[String]) -> Result<CliAction, JexError> {
    if matches!(
        args.first().map(String::as_str),
        None | Some("-h") | Some("--help")
    ) {
        return Ok(CliAction::Help);
    }

    // Ansible flags after the expression must not be read as ours.
    let mut positional = vec!["--"];
    positional.extend(args.iter().map(String::as_str));
    Args::from_args(&[command_name], &positional)
        .map(CliAction::Evaluate)
        .map_err(|EarlyExit { output, .. }| JexError::InvalidArguments(output))
}

/// Program name to show in usage text, derived from `argv[0]`.
pub fn command_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "jex".to_string())
}

const USAGE: &str = r#"Jinja2 Expression Tester (JEX)
------------------------------
Usage: {command_name} "{{ YOUR_JINJA_EXPRESSION }}" [options]

Description:
Executes a Jinja2 expression using Ansible's templating engine (ansible localhost -m debug).
This is ideal for testing filters, lookups, and variable logic.

Arguments:
  The expression must be enclosed in double quotes.
  Any further arguments are passed to ansible unchanged (e.g. -e name=value).

Examples:
  {command_name} "{{ [ 2, 4, 6, 8, 10 ] | reverse }}"
  {command_name} "{{ lookup('env', 'USER') }}"
  {command_name} "{{ non_existent_var | default('Default Value', true) }}"
  {command_name} "{{ 'TestString' | regex_replace('S.*g', 'Word') }}"
"#;

pub fn usage(command_name: &str) -> String {
    USAGE.replace("{command_name}", command_name)
}

pub fn print_usage(out: &mut dyn Write, command_name: &str) -> std::io::Result<()> {
    out.write_all(usage(command_name).as_bytes())
}
