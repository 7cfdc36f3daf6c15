//! Check command implementation.
//!
//! Runs the monitoring-plugin check against a fresh process snapshot.

use check_proc::check::unknown;
use check_proc::{evaluate, CheckResult, ProcessSource, ProcessTable};
use tracing::{debug, error, info};

/// Checks whether `target` runs with the configured parent pid.
///
/// Never fails: an unreadable process table becomes an UNKNOWN verdict.
pub fn command_check<S: ProcessSource>(
    table: &ProcessTable<S>,
    target: &str,
    parent_pid: u32,
) -> CheckResult {
    let records = match table.snapshot() {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to read process table: {}", e);
            return unknown(e);
        }
    };
    debug!(
        "Checking {} processes for '{}' with parent pid {}",
        records.len(),
        target,
        parent_pid
    );

    let result = evaluate(&records, target, parent_pid);
    info!("Check result for '{}': {}", target, result.status);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use check_proc::{CheckStatus, ProcFs};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_command_check_ok_and_critical() {
        let dir = tempdir().expect("Failed to create temp dir");
        let pid_dir = dir.path().join("300");
        fs::create_dir(&pid_dir).unwrap();
        fs::write(pid_dir.join("stat"), "300 (sshd) S 1 300 300 0 -1\n").unwrap();

        let table = ProcessTable::new(ProcFs::new(dir.path()));
        assert_eq!(command_check(&table, "sshd", 1).status, CheckStatus::Ok);
        assert_eq!(
            command_check(&table, "nginx", 1).status,
            CheckStatus::Critical
        );
    }

    #[test]
    fn test_command_check_unreadable_table_is_unknown() {
        let dir = tempdir().expect("Failed to create temp dir");
        let table = ProcessTable::new(ProcFs::new(dir.path().join("missing")));

        let result = command_check(&table, "sshd", 1);
        assert_eq!(result.status, CheckStatus::Unknown);
        assert!(result.message.starts_with("Error: cannot enumerate processes"));
    }
}
