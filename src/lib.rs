//! check-proc library
//!
//! Reads the live process table from the proc filesystem and answers the
//! monitoring question "is program X running on its own, adopted by init?".
//!
//! # Features
//!
//! - **Process snapshots**: every readable process with pid, parent pid and name
//! - **Single lookups**: read one pid without scanning the whole table
//! - **Injectable registry**: point the reader at any directory laid out like `/proc`
//! - **Plugin verdicts**: Nagios/Sensu compatible OK/CRITICAL/UNKNOWN states
//!
//! # Usage
//!
//! ```rust
//! use check_proc::{Process, ProcessTable};
//!
//! let table = ProcessTable::system();
//!
//! if let Ok(records) = table.snapshot() {
//!     for p in &records {
//!         println!("{} {} {}", p.pid(), p.ppid(), p.executable());
//!     }
//! }
//!
//! // Absent pids are not an error
//! if let Ok(None) = table.lookup(u32::MAX) {
//!     println!("not running");
//! }
//! ```

pub mod check;
pub mod process;

// Re-export main types for convenience
pub use check::{evaluate, find_detached, CheckResult, CheckStatus, INIT_PID};
pub use process::{
    find_process, processes, ProcError, ProcFs, Process, ProcessRecord, ProcessSource,
    ProcessTable, Snapshot,
};
