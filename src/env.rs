use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Snapshot of the process environment handed to the external tool.
///
/// The environment contains:
/// - `vars`: variables visible to the child; `PATH` is also used to resolve the tool.
/// - `current_dir`: the working directory the child runs in.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// The working directory for the child process.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    pub fn new() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// Get the value of an environment variable.
    ///
    /// Only the snapshot is consulted, so overriding `PATH` here fully controls tool lookup.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
