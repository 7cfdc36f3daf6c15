//! check-proc - version 0.1.0
//!
//! Nagios/Sensu plugin that checks a named process is running under init.
//! This is the main entry point that resolves configuration and dispatches
//! to the plugin check or one of the subcommands.

mod cli;
mod commands;
mod config;
mod startup_checks;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, error, info, Level};

use check_proc::CheckStatus;
use cli::{Args, Commands, LogLevel};
use commands::{build_table, command_check, command_list, command_lookup};
use config::{render_config, resolve_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
///
/// Logs go to stderr; stdout is reserved for the plugin output line.
fn setup_logging(config: &Config) {
    let log_level = match config.log_level() {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
        return;
    }

    debug!("Logging initialized with level: {:?}", log_level);
}

/// Prints usage help; a plugin invoked wrongly reports UNKNOWN.
fn usage() -> CheckStatus {
    let _ = Args::command().print_help();
    println!();
    CheckStatus::Unknown
}

fn run(args: Args) -> anyhow::Result<CheckStatus> {
    let config = resolve_config(&args)?;

    if args.check_config {
        validate_effective_config(&config)?;
        println!("✅ Configuration is valid");
        return Ok(CheckStatus::Ok);
    }
    if args.show_config {
        print!("{}", render_config(&config, args.config_format)?);
        return Ok(CheckStatus::Ok);
    }

    validate_effective_config(&config)?;
    setup_logging(&config);

    // Configure parallel processing
    if let Some(threads) = config.thread_count() {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .unwrap_or_else(|e| error!("Failed to set rayon thread pool: {}", e));
        debug!("Rayon thread pool configured with {} threads", threads);
    }

    let table = build_table(&config);

    match &args.command {
        Some(Commands::List { format, name }) => {
            command_list(&table, *format, name.as_deref())?;
            Ok(CheckStatus::Ok)
        }
        Some(Commands::Lookup { pid, format }) => command_lookup(&table, *pid, *format),
        Some(Commands::CheckRequirements) => {
            println!("🔍 Checking Runtime Requirements");
            println!("================================\n");

            match startup_checks::validate_requirements(&table, &config.proc_root()) {
                Ok(()) => {
                    println!("✅ All requirements met");
                    Ok(CheckStatus::Ok)
                }
                Err(e) => {
                    println!("❌ Requirements check failed: {}", e);
                    Ok(CheckStatus::Critical)
                }
            }
        }
        None => {
            let target = match args.target.as_deref() {
                Some(t) if !t.is_empty() => t,
                _ => return Ok(usage()),
            };

            info!("Checking for process '{}'", target);
            let result = command_check(&table, target, config.parent_pid());
            println!("{}", result.message);
            Ok(result.status)
        }
    }
}

/// Main application entry point.
fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Explicit --help/--version succeed; usage errors are UNKNOWN.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => CheckStatus::Unknown.code(),
            };
            std::process::exit(code);
        }
    };

    let status = match run(args) {
        Ok(status) => status,
        Err(e) => {
            println!("Error: {:#}", e);
            CheckStatus::Unknown
        }
    };

    std::process::exit(status.code());
}
