//! Process table access over the proc filesystem.
//!
//! This module provides:
//! - `record`: the `ProcessRecord` descriptor and `Process` capability
//! - `stat`: parsing of `/proc/<pid>/stat`
//! - `source`: the injectable process registry (`ProcFs` for real systems)
//! - `scanner`: pid discovery
//! - `table`: snapshots and single-process lookups

pub mod error;
pub mod record;
pub mod scanner;
pub mod source;
pub mod stat;
pub mod table;

// Re-export commonly used types
pub use error::ProcError;
pub use record::{Process, ProcessRecord};
pub use scanner::collect_pids;
pub use source::{ProcFs, ProcessSource, RegistryEntry, DEFAULT_PROC_ROOT};
pub use stat::parse_stat;
pub use table::{find_process, processes, ProcessTable, Snapshot};
