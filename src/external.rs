use crate::command::{Execution, ExitCode, Invocation, ProcessRunner};
use crate::env::Environment;
use crate::error::{JexError, JexResult};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Runs the external tool as a real child process.
///
/// The child sees the variables and working directory of the wrapped [`Environment`].
/// The call blocks until the child exits; no timeout is applied.
pub struct SystemRunner {
    env: Environment,
}

impl SystemRunner {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}

impl ProcessRunner for SystemRunner {
    fn execute(&self, invocation: &Invocation) -> JexResult<Execution> {
        let not_found = || JexError::ToolNotFound {
            program: invocation.program().to_string(),
        };
        let spawn_error = |source: std::io::Error| JexError::Spawn {
            program: invocation.program().to_string(),
            source,
        };

        let search_paths = self.env.get_var("PATH").unwrap_or_default();
        let executable =
            find_command_path(OsStr::new(&search_paths), Path::new(invocation.program()))
                .ok_or_else(not_found)?;
        tracing::debug!(executable = %executable.display(), "resolved external tool");

        // stdout and stderr share one pipe so the output keeps the child's write order.
        let (mut reader, writer) = std::io::pipe().map_err(spawn_error)?;
        let mut command = Command::new(&*executable);
        command
            .args(invocation.args())
            .envs(self.env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.env.current_dir)
            .stdout(writer.try_clone().map_err(spawn_error)?)
            .stderr(writer);
        let mut child = command.spawn().map_err(|source| match source.kind() {
            ErrorKind::NotFound => not_found(),
            _ => spawn_error(source),
        })?;
        // The command still owns the write ends; reading would never see EOF.
        drop(command);

        let mut output = Vec::new();
        reader.read_to_end(&mut output).map_err(spawn_error)?;
        let status = child.wait().map_err(spawn_error)?;

        let exit_code = match status.code() {
            Some(x) => x,
            None => terminated_by_signal(status),
        };
        tracing::debug!(exit_code, bytes = output.len(), "external tool finished");

        Ok(Execution { exit_code, output })
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    exit_status.signal().map_or(-1, |signal| 128 + signal)
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it is an executable file.
/// - Relative with multiple components (e.g., `bin/ansible`): returns it if it is an
///   executable file.
/// - Single path component (no separators): search each directory in `search_paths` (PATH)
///   and return the first executable file, skipping non-executable ones like `execvp` does.
/// - Empty path: returns `None`.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let mut components = path.components();
    let first = components.next();
    let second = components.next();
    match (first, second) {
        (None, None) => None,
        (Some(x), None) => find_in_path(search_paths, x.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(cmd))
        .find(|path| is_executable(path))
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if is_executable(path) { Some(path) } else { None }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
