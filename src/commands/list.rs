//! List command implementation.
//!
//! Prints the current process table.

use check_proc::{Process, ProcessSource, ProcessTable, Snapshot};
use std::fmt::Write as _;
use std::time::Instant;
use tracing::debug;

use crate::cli::OutputFormat;

/// Prints every readable process, optionally only those named `name`.
pub fn command_list<S: ProcessSource>(
    table: &ProcessTable<S>,
    format: OutputFormat,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut snapshot = table.snapshot_report()?;
    debug!(
        "Scan took {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(name) = name {
        snapshot.records.retain(|p| p.executable() == name);
    }
    snapshot.records.sort_by_key(|p| p.pid());

    print!("{}", render_snapshot(&snapshot, format)?);
    Ok(())
}

pub(crate) fn render_snapshot(snapshot: &Snapshot, format: OutputFormat) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(snapshot)?,
        OutputFormat::Toml => toml::to_string_pretty(snapshot)?,
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{:>7} {:>7} S NAME", "PID", "PPID")?;
            for p in &snapshot.records {
                writeln!(
                    out,
                    "{:>7} {:>7} {} {}",
                    p.pid(),
                    p.ppid(),
                    p.state(),
                    p.executable()
                )?;
            }
            writeln!(
                out,
                "{} processes ({} vanished, {} malformed skipped)",
                snapshot.records.len(),
                snapshot.vanished,
                snapshot.malformed
            )?;
            out
        }
    };
    Ok(out)
}
