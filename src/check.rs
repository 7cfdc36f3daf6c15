//! Monitoring-plugin verdict for "is this program running detached?".
//!
//! A process counts as running when its executable name matches and it has
//! been reparented to the init/reaper process, i.e. it is not merely a child
//! of the shell that started it.
//!
//! # Usage
//!
//! ```rust
//! use check_proc::{evaluate, CheckStatus, ProcessTable, INIT_PID};
//!
//! let records = ProcessTable::system().snapshot().unwrap_or_default();
//! let result = evaluate(&records, "sshd", INIT_PID);
//! println!("{}", result.message);
//! assert!(matches!(result.status, CheckStatus::Ok | CheckStatus::Critical));
//! ```

use serde::Serialize;
use std::fmt;

use crate::process::Process;

/// Pid of the primordial process that adopts orphaned processes.
pub const INIT_PID: u32 = 1;

/// Nagios/Sensu plugin states, with their exit codes as discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl CheckStatus {
    /// Process exit code for this state.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Critical => "CRITICAL",
            CheckStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Verdict plus the single line a plugin prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
    /// Pid of the matching process, if any.
    pub pid: Option<u32>,
}

/// Finds the first process named `target` whose parent is `parent_pid`.
pub fn find_detached<'a, P: Process>(
    records: &'a [P],
    target: &str,
    parent_pid: u32,
) -> Option<&'a P> {
    records
        .iter()
        .find(|p| p.executable() == target && p.ppid() == parent_pid)
}

/// Evaluates a snapshot: OK if `target` runs under `parent_pid`, CRITICAL
/// otherwise.
pub fn evaluate<P: Process>(records: &[P], target: &str, parent_pid: u32) -> CheckResult {
    match find_detached(records, target, parent_pid) {
        Some(p) => CheckResult {
            status: CheckStatus::Ok,
            message: format!("Process exist: {}, pid: {}", p.executable(), p.pid()),
            pid: Some(p.pid()),
        },
        None => CheckResult {
            status: CheckStatus::Critical,
            message: format!("Process do not exist: {}", target),
            pid: None,
        },
    }
}

/// Verdict used when the check could not run at all.
pub fn unknown(error: impl fmt::Display) -> CheckResult {
    CheckResult {
        status: CheckStatus::Unknown,
        message: format!("Error: {}", error),
        pid: None,
    }
}
