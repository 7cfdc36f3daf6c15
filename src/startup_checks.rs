//! Runtime requirement validation for check-proc.
//!
//! This module validates that the process table can be read before the
//! check results are trusted.

use check_proc::{Process, ProcessSource, ProcessTable};
use nix::unistd::geteuid;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Validate all runtime requirements against the proc root of `table`.
pub fn validate_requirements<S: ProcessSource>(
    table: &ProcessTable<S>,
    proc_root: &Path,
) -> Result<(), ValidationError> {
    info!("🔍 Validating runtime requirements...");

    check_user_privileges();
    check_proc_mounted(proc_root)?;
    check_process_table(table, proc_root)?;

    info!("✅ All runtime requirements validated");
    Ok(())
}

/// Check if running with sufficient privileges
fn check_user_privileges() {
    if !geteuid().is_root() {
        warn!("⚠️  Not running as root - processes hidden by hidepid= mounts will be missed");
    } else {
        info!("✅ Running as root (uid=0)");
    }
}

/// Check the proc root exists and is a directory
fn check_proc_mounted(proc_root: &Path) -> Result<(), ValidationError> {
    if !proc_root.is_dir() {
        error!("❌ {} not found - proc filesystem not mounted", proc_root.display());
        error!("   Solution: mount -t proc proc {}", proc_root.display());
        return Err(ValidationError::ProcNotMounted(
            proc_root.display().to_string(),
        ));
    }
    info!("✅ {} is present", proc_root.display());
    Ok(())
}

/// Check the table can be listed and at least one record parsed
fn check_process_table<S: ProcessSource>(
    table: &ProcessTable<S>,
    proc_root: &Path,
) -> Result<(), ValidationError> {
    let snapshot = table
        .snapshot_report()
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?;

    if snapshot.records.is_empty() {
        error!("❌ No process status records readable under {}", proc_root.display());
        return Err(ValidationError::NoProcesses(
            proc_root.display().to_string(),
        ));
    }
    info!(
        "✅ Read {} processes ({} vanished, {} malformed)",
        snapshot.records.len(),
        snapshot.vanished,
        snapshot.malformed
    );

    // Our own pid is only visible when the root belongs to our pid namespace.
    let own_pid = std::process::id();
    match table.lookup(own_pid) {
        Ok(Some(p)) => debug!("Own process visible as '{}' (ppid {})", p.executable(), p.ppid()),
        Ok(None) => warn!(
            "⚠️  Own pid {} not found under {} - different pid namespace?",
            own_pid,
            proc_root.display()
        ),
        Err(e) => warn!("⚠️  Could not read own process status: {}", e),
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("proc filesystem not mounted at {0}")]
    ProcNotMounted(String),

    #[error("process table unreadable: {0}")]
    Unreadable(String),

    #[error("no readable processes under {0}")]
    NoProcesses(String),
}
