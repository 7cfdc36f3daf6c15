//! CLI command implementations for check-proc.
//!
//! This module provides implementations for all CLI modes:
//! - `check`: the monitoring-plugin check (default mode)
//! - `list`: process table listing
//! - `lookup`: single process lookup

pub mod check;
pub mod list;
pub mod lookup;

use check_proc::{ProcFs, ProcessTable};

use crate::config::Config;

// Re-export command functions
pub use check::command_check;
pub use list::command_list;
pub use lookup::command_lookup;

/// Builds the process table described by the effective config.
pub fn build_table(config: &Config) -> ProcessTable {
    ProcessTable::new(ProcFs::new(config.proc_root()))
        .with_parallel(config.parallel_scan.unwrap_or(true))
}
