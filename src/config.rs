//! Configuration management for check-proc.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use anyhow::{bail, Context};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Args, ConfigFormat, LogLevel};
use check_proc::process::DEFAULT_PROC_ROOT;
use check_proc::INIT_PID;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Config files tried in order when `--config` is not given.
pub const DEFAULT_CONFIG_PATHS: [&str; 8] = [
    "/etc/check-proc/config.yaml",
    "/etc/check-proc/config.yml",
    "/etc/check-proc/config.json",
    "/etc/check-proc/config.toml",
    "./check-proc.yaml",
    "./check-proc.yml",
    "./check-proc.json",
    "./check-proc.toml",
];

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mount point of the proc filesystem
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    /// Parent pid a matching process must have
    #[serde(alias = "parent-pid")]
    pub parent_pid: Option<u32>,

    // Scanning
    #[serde(alias = "parallel-scan")]
    pub parallel_scan: Option<bool>,
    pub parallelism: Option<usize>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            parent_pid: Some(INIT_PID),
            parallel_scan: Some(true),
            parallelism: None,
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }

    pub fn parent_pid(&self) -> u32 {
        self.parent_pid.unwrap_or(INIT_PID)
    }

    /// Rayon worker count; `None` (unset or 0) leaves rayon's default.
    pub fn thread_count(&self) -> Option<usize> {
        self.parallelism.filter(|&n| n > 0)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
            .unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> anyhow::Result<()> {
    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            bail!("proc_root must not be empty");
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_str(level, true).is_err() {
            bail!(
                "Invalid log_level '{}', expected one of off/error/warn/info/debug/trace",
                level
            );
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(ppid) = args.parent_pid {
        config.parent_pid = Some(ppid);
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(format!("{:?}", level).to_lowercase());
    }
    if args.no_parallel {
        config.parallel_scan = Some(false);
    }
    if let Some(threads) = args.parallelism {
        config.parallelism = Some(threads);
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            // Try default locations
            match DEFAULT_CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|p| p.exists()) {
                Some(p) => p.to_path_buf(),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
    };
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.proc_root(), PathBuf::from("/proc"));
        assert_eq!(cfg.parent_pid(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_root_and_bad_level() {
        let mut cfg = Config::default();
        cfg.proc_root = Some(PathBuf::new());
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.log_level = Some("loud".into());
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_accepts_zero_parallelism_as_auto() {
        let mut cfg = Config::default();
        cfg.parallelism = Some(0);
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.thread_count(), None);

        cfg.parallelism = Some(3);
        assert_eq!(cfg.thread_count(), Some(3));

        cfg.parallelism = None;
        assert_eq!(cfg.thread_count(), None);
    }

    #[test]
    fn test_default_config_paths() {
        assert_eq!(DEFAULT_CONFIG_PATHS[0], "/etc/check-proc/config.yaml");
        for ext in ["yaml", "yml", "json", "toml"] {
            assert!(DEFAULT_CONFIG_PATHS.contains(&format!("/etc/check-proc/config.{ext}").as_str()));
            assert!(DEFAULT_CONFIG_PATHS.contains(&format!("./check-proc.{ext}").as_str()));
        }
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("check-proc.yaml");
        fs::write(&path, "proc-root: /host/proc\nparent_pid: 7\nparallel_scan: false\n").unwrap();

        let cfg = load_config(Some(path.as_path())).unwrap();
        assert_eq!(cfg.proc_root(), PathBuf::from("/host/proc"));
        assert_eq!(cfg.parent_pid(), 7);
        assert_eq!(cfg.parallel_scan, Some(false));
    }

    #[test]
    fn test_load_json_and_toml_config() {
        let dir = tempdir().expect("Failed to create temp dir");

        let json = dir.path().join("c.json");
        fs::write(&json, r#"{"parent_pid": 2, "log_level": "debug"}"#).unwrap();
        let cfg = load_config(Some(json.as_path())).unwrap();
        assert_eq!(cfg.parent_pid(), 2);
        assert!(matches!(cfg.log_level(), LogLevel::Debug));

        let toml_path = dir.path().join("c.toml");
        fs::write(&toml_path, "parallelism = 4\n").unwrap();
        let cfg = load_config(Some(toml_path.as_path())).unwrap();
        assert_eq!(cfg.parallelism, Some(4));
        assert_eq!(cfg.proc_root, None);
        assert_eq!(cfg.proc_root(), PathBuf::from("/proc"));
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(load_config(Some(dir.path().join("nope.yaml").as_path())).is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("check-proc.yaml");
        fs::write(&path, "parent_pid: 7\nlog_level: info\n").unwrap();

        let args = Args::try_parse_from([
            "check-proc",
            "--config",
            path.to_str().unwrap(),
            "--parent-pid",
            "9",
            "--log-level",
            "trace",
            "--no-parallel",
        ])
        .unwrap();

        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.parent_pid(), 9);
        assert!(matches!(cfg.log_level(), LogLevel::Trace));
        assert_eq!(cfg.parallel_scan, Some(false));
    }

    #[test]
    fn test_render_config_formats() {
        let cfg = Config::default();
        assert!(render_config(&cfg, ConfigFormat::Yaml)
            .unwrap()
            .contains("proc_root: /proc"));
        assert!(render_config(&cfg, ConfigFormat::Json)
            .unwrap()
            .contains("\"parent_pid\": 1"));
        assert!(render_config(&cfg, ConfigFormat::Toml)
            .unwrap()
            .contains("parallel_scan = true"));
    }
}
