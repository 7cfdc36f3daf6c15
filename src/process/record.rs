//! Process descriptors produced by the process table.

use serde::Serialize;
use std::fmt;

/// Identity questions every platform's process descriptor can answer.
pub trait Process {
    /// Process ID.
    fn pid(&self) -> u32;

    /// Parent process ID.
    fn ppid(&self) -> u32;

    /// Executable name running this process. This is not a path.
    fn executable(&self) -> &str;
}

/// A process as read from `/proc/<pid>/stat` at one point in time.
///
/// Records are never refreshed in place: reading the same pid again produces a
/// new record and the caller decides which one to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pid: u32,
    ppid: u32,
    name: String,
    state: char,
    pgrp: i32,
    session: i32,
}

impl ProcessRecord {
    /// Only the status parser builds records, so a record always carries a
    /// positive pid and a non-empty name.
    pub(crate) fn new(
        pid: u32,
        ppid: u32,
        name: String,
        state: char,
        pgrp: i32,
        session: i32,
    ) -> Self {
        debug_assert!(pid > 0);
        debug_assert!(!name.is_empty());
        Self {
            pid,
            ppid,
            name,
            state,
            pgrp,
            session,
        }
    }

    /// Single-character scheduler state (`R`, `S`, `D`, `Z`, ...).
    pub fn state(&self) -> char {
        self.state
    }

    /// Process group ID.
    pub fn pgrp(&self) -> i32 {
        self.pgrp
    }

    /// Session ID.
    pub fn session(&self) -> i32 {
        self.session
    }
}

impl Process for ProcessRecord {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn ppid(&self) -> u32 {
        self.ppid
    }

    fn executable(&self) -> &str {
        &self.name
    }
}

/// Renders the leading fields in `/proc/<pid>/stat` layout.
impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} {} {} {}",
            self.pid, self.name, self.state, self.ppid, self.pgrp, self.session
        )
    }
}
