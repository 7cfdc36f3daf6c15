//! Access to the kernel's process registry.
//!
//! The process table never touches the filesystem directly; it goes through a
//! [`ProcessSource`]. [`ProcFs`] is the real implementation and can be rooted
//! anywhere, which lets tests point it at a fixture directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::process::error::ProcError;

/// Default mount point of the proc filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// One entry of the process registry listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Read-only view of a live process registry.
pub trait ProcessSource: Sync {
    /// Lists every entry at the top of the registry, processes or not.
    fn entries(&self) -> Result<Vec<RegistryEntry>, ProcError>;

    /// Checks whether `pid` currently has a registry entry.
    fn exists(&self, pid: u32) -> io::Result<bool>;

    /// Reads the raw status record of `pid`.
    fn read_stat(&self, pid: u32) -> io::Result<String>;
}

/// Process registry backed by a mounted proc filesystem.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_path(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcessSource for ProcFs {
    fn entries(&self) -> Result<Vec<RegistryEntry>, ProcError> {
        let dir = fs::read_dir(&self.root).map_err(|source| ProcError::Enumeration {
            path: self.root.clone(),
            source,
        })?;

        let mut out = Vec::new();
        // Entries that fail mid-listing belong to processes exiting under us.
        for entry in dir.flatten() {
            let name = match entry.file_name().into_string() {
                Ok(v) => v,
                Err(_) => continue,
            };
            // file_type() does not follow symlinks, so /proc/self is not a dir.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            out.push(RegistryEntry { name, is_dir });
        }
        Ok(out)
    }

    fn exists(&self, pid: u32) -> io::Result<bool> {
        match fs::metadata(self.pid_path(pid)) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn read_stat(&self, pid: u32) -> io::Result<String> {
        fs::read_to_string(self.pid_path(pid).join("stat"))
    }
}
