//! Error types for process table access.

use std::io;
use std::path::PathBuf;

/// Failures raised while reading the process table.
///
/// Bulk snapshots only ever surface [`ProcError::Enumeration`]; the per-process
/// variants are absorbed there and surface from single lookups.
#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    /// The process registry itself could not be opened or listed.
    #[error("cannot enumerate processes in {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The process disappeared between discovery and reading its status record.
    #[error("process {pid} vanished before its status could be read: {source}")]
    Vanished {
        pid: u32,
        #[source]
        source: io::Error,
    },

    /// The status record was read but does not have the expected layout.
    #[error("malformed status record for process {pid}: {reason}")]
    MalformedRecord { pid: u32, reason: String },
}

impl ProcError {
    pub(crate) fn malformed(pid: u32, reason: impl Into<String>) -> Self {
        ProcError::MalformedRecord {
            pid,
            reason: reason.into(),
        }
    }

    /// True for failures that a bulk snapshot skips instead of propagating.
    pub fn is_per_process(&self) -> bool {
        matches!(
            self,
            ProcError::Vanished { .. } | ProcError::MalformedRecord { .. }
        )
    }
}
