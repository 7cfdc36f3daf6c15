//! Process discovery over a process registry.

use tracing::trace;

use crate::process::error::ProcError;
use crate::process::source::ProcessSource;

/// Collects the pids of all processes visible in `source`.
///
/// Only directory entries named purely by decimal digits are processes; other
/// registry entries (`self`, `sys`, `uptime`, ...) are skipped, as are names
/// that do not fit a pid. Order is whatever the registry lists.
pub fn collect_pids(source: &dyn ProcessSource) -> Result<Vec<u32>, ProcError> {
    let mut out = Vec::new();
    for entry in source.entries()? {
        if !entry.is_dir {
            continue;
        }
        if entry.name.is_empty() || !entry.name.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let pid: u32 = match entry.name.parse() {
            Ok(0) => continue,
            Ok(v) => v,
            Err(_) => {
                trace!("Skipping registry entry {}: not a valid pid", entry.name);
                continue;
            }
        };
        out.push(pid);
    }
    Ok(out)
}
