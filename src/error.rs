//! Error types for running the external tool.

/// Failures that stop an evaluation before any Ansible output is available.
#[derive(Debug, thiserror::Error)]
pub enum JexError {
    #[error("'{program}' command not found. Ensure Ansible is installed and in your PATH.")]
    ToolNotFound { program: String },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write trace file: {source}")]
    Trace {
        #[source]
        source: std::io::Error,
    },

    /// argh's rejection of the argument list. With `--` prepended this only
    /// happens if `Args` gains another required positional.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type JexResult<T> = std::result::Result<T, JexError>;
