//! Lookup command implementation.

use check_proc::{CheckStatus, Process, ProcessSource, ProcessTable};

use crate::cli::OutputFormat;

/// Prints the process with `pid`; CRITICAL when it is not running.
pub fn command_lookup<S: ProcessSource>(
    table: &ProcessTable<S>,
    pid: u32,
    format: OutputFormat,
) -> anyhow::Result<CheckStatus> {
    let Some(p) = table.lookup(pid)? else {
        println!("Process {} is not running", pid);
        return Ok(CheckStatus::Critical);
    };

    match format {
        OutputFormat::Text => {
            println!("pid:     {}", p.pid());
            println!("ppid:    {}", p.ppid());
            println!("name:    {}", p.executable());
            println!("state:   {}", p.state());
            println!("pgrp:    {}", p.pgrp());
            println!("session: {}", p.session());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&p)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&p)?),
        OutputFormat::Toml => print!("{}", toml::to_string_pretty(&p)?),
    }
    Ok(CheckStatus::Ok)
}
