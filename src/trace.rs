//! Persisting the raw output of a failed run.
//!
//! Every failing run writes its captured text to a fresh, uniquely named file.
//! The file is closed before the path is returned and is never removed by jex.

use crate::error::{JexError, JexResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where trace files go and how they are named.
#[derive(Debug, Clone)]
pub struct TraceStore {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl TraceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "jex-trace-".to_string(),
            suffix: ".log".to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` verbatim to a new temp file and return its path.
    pub fn write(&self, content: &[u8]) -> JexResult<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(&self.suffix)
            .tempfile_in(&self.dir)
            .map_err(|source| JexError::Trace { source })?;
        file.write_all(content)
            .and_then(|_| file.flush())
            .map_err(|source| JexError::Trace { source })?;
        let (_file, path) = file.keep().map_err(|e| JexError::Trace { source: e.error })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "trace written");
        Ok(path)
    }
}

impl Default for TraceStore {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}
