//! Point-in-time views of the process table.
//!
//! Nothing here is cached: every call re-reads the registry, so a snapshot is
//! "truth as of now" and may already be stale when it is returned.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::process::error::ProcError;
use crate::process::record::ProcessRecord;
use crate::process::scanner::collect_pids;
use crate::process::source::{ProcFs, ProcessSource};
use crate::process::stat::parse_stat;

/// Result of a full scan, including what was dropped along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Pids that exited between discovery and reading their status.
    pub vanished: usize,
    /// Pids whose status record could not be parsed.
    pub malformed: usize,
    pub records: Vec<ProcessRecord>,
}

/// Builds process snapshots and single-process lookups from a [`ProcessSource`].
pub struct ProcessTable<S = ProcFs> {
    source: S,
    parallel: bool,
}

impl ProcessTable<ProcFs> {
    /// Table over the system's `/proc`.
    pub fn system() -> Self {
        Self::new(ProcFs::default())
    }
}

impl<S: ProcessSource> ProcessTable<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            parallel: false,
        }
    }

    /// Parse status records on the rayon pool instead of sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All processes that could be read, in no particular order.
    ///
    /// Processes that vanish or carry a malformed status record are left out;
    /// only a registry that cannot be listed fails the call.
    pub fn snapshot(&self) -> Result<Vec<ProcessRecord>, ProcError> {
        self.snapshot_report().map(|s| s.records)
    }

    /// Like [`snapshot`](Self::snapshot), also counting skipped processes.
    pub fn snapshot_report(&self) -> Result<Snapshot, ProcError> {
        let pids = collect_pids(&self.source)?;
        debug!("Collected {} process ids from registry", pids.len());

        let vanished = AtomicUsize::new(0);
        let malformed = AtomicUsize::new(0);

        let read_one = |&pid: &u32| match self.read_record(pid) {
            Ok(rec) => Some(rec),
            Err(e) => {
                match e {
                    ProcError::Vanished { .. } => vanished.fetch_add(1, Ordering::Relaxed),
                    _ => malformed.fetch_add(1, Ordering::Relaxed),
                };
                debug!("Skipping process {}: {}", pid, e);
                None
            }
        };

        let records: Vec<ProcessRecord> = if self.parallel {
            pids.par_iter().filter_map(read_one).collect()
        } else {
            pids.iter().filter_map(read_one).collect()
        };

        let snapshot = Snapshot {
            records,
            vanished: vanished.into_inner(),
            malformed: malformed.into_inner(),
        };
        debug!(
            "Snapshot complete: {} records, {} vanished, {} malformed",
            snapshot.records.len(),
            snapshot.vanished,
            snapshot.malformed
        );
        Ok(snapshot)
    }

    /// Looks up a single process.
    ///
    /// `Ok(None)` means no such process is running. Once the process is known
    /// to exist, failing to read or parse its status is an error. An existence
    /// check that fails for any reason other than not-found (e.g. permission
    /// denied on `<root>/<pid>`) is reported as [`ProcError::Vanished`]
    /// carrying the underlying I/O error.
    pub fn lookup(&self, pid: u32) -> Result<Option<ProcessRecord>, ProcError> {
        if pid == 0 {
            return Ok(None);
        }
        let present = self
            .source
            .exists(pid)
            .map_err(|source| ProcError::Vanished { pid, source })?;
        if !present {
            trace!("Process {} not present", pid);
            return Ok(None);
        }

        match self.read_record(pid) {
            Ok(rec) => Ok(Some(rec)),
            // Exited between the existence check and the read.
            Err(ProcError::Vanished { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read_record(&self, pid: u32) -> Result<ProcessRecord, ProcError> {
        let content = self
            .source
            .read_stat(pid)
            .map_err(|source| ProcError::Vanished { pid, source })?;
        parse_stat(pid, &content)
    }
}

/// Snapshot of the system's `/proc`.
pub fn processes() -> Result<Vec<ProcessRecord>, ProcError> {
    ProcessTable::system().snapshot()
}

/// Looks up `pid` in the system's `/proc`.
pub fn find_process(pid: u32) -> Result<Option<ProcessRecord>, ProcError> {
    ProcessTable::system().lookup(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::record::Process;
    use crate::process::source::RegistryEntry;
    use std::collections::HashMap;

    /// In-memory registry: pid -> status text, `None` for a pid whose status
    /// cannot be read any more.
    struct FakeRegistry {
        stats: HashMap<u32, Option<&'static str>>,
        decoys: Vec<&'static str>,
    }

    impl ProcessSource for FakeRegistry {
        fn entries(&self) -> Result<Vec<RegistryEntry>, ProcError> {
            let mut out: Vec<RegistryEntry> = self
                .stats
                .keys()
                .map(|pid| RegistryEntry {
                    name: pid.to_string(),
                    is_dir: true,
                })
                .collect();
            out.extend(self.decoys.iter().map(|d| RegistryEntry {
                name: d.to_string(),
                is_dir: false,
            }));
            Ok(out)
        }

        fn exists(&self, pid: u32) -> io::Result<bool> {
            Ok(self.stats.contains_key(&pid))
        }

        fn read_stat(&self, pid: u32) -> io::Result<String> {
            match self.stats.get(&pid) {
                Some(Some(s)) => Ok(s.to_string()),
                _ => Err(io::ErrorKind::NotFound.into()),
            }
        }
    }

    fn registry() -> FakeRegistry {
        FakeRegistry {
            stats: HashMap::from([
                (1, Some("1 (init) S 0 1 1")),
                (2, Some("2 (kthreadd) S 0 0 0")),
                (300, Some("300 (sshd) S 1 300 300 0 -1")),
                (301, None),
                (302, Some("302 garbage")),
            ]),
            decoys: vec!["303", "self"],
        }
    }

    fn sorted_pids(records: &[ProcessRecord]) -> Vec<u32> {
        let mut pids: Vec<u32> = records.iter().map(|r| r.pid()).collect();
        pids.sort_unstable();
        pids
    }

    #[test]
    fn test_snapshot_skips_vanished_and_malformed() {
        let table = ProcessTable::new(registry());
        let report = table.snapshot_report().unwrap();

        assert_eq!(sorted_pids(&report.records), vec![1, 2, 300]);
        assert_eq!(report.vanished, 1);
        assert_eq!(report.malformed, 1);
    }

    #[test]
    fn test_snapshot_parallel_matches_sequential() {
        let seq = ProcessTable::new(registry()).snapshot().unwrap();
        let par = ProcessTable::new(registry())
            .with_parallel(true)
            .snapshot()
            .unwrap();

        assert_eq!(sorted_pids(&seq), sorted_pids(&par));
    }

    #[test]
    fn test_lookup_existing_process() {
        let table = ProcessTable::new(registry());
        let rec = table.lookup(300).unwrap().expect("sshd is running");
        assert_eq!(rec.executable(), "sshd");
        assert_eq!(rec.ppid(), 1);
    }

    #[test]
    fn test_lookup_absent_process_is_none() {
        let table = ProcessTable::new(registry());
        assert!(table.lookup(4242).unwrap().is_none());
        assert!(table.lookup(0).unwrap().is_none());
    }

    #[test]
    fn test_lookup_vanished_after_exists_is_none() {
        let table = ProcessTable::new(registry());
        assert!(table.lookup(301).unwrap().is_none());
    }

    /// Registry that refuses the existence check.
    struct DeniedRegistry;

    impl ProcessSource for DeniedRegistry {
        fn entries(&self) -> Result<Vec<RegistryEntry>, ProcError> {
            Ok(Vec::new())
        }

        fn exists(&self, _pid: u32) -> io::Result<bool> {
            Err(io::ErrorKind::PermissionDenied.into())
        }

        fn read_stat(&self, _pid: u32) -> io::Result<String> {
            Err(io::ErrorKind::PermissionDenied.into())
        }
    }

    #[test]
    fn test_lookup_exists_error_is_surfaced() {
        let table = ProcessTable::new(DeniedRegistry);
        match table.lookup(42) {
            Err(ProcError::Vanished { pid, source }) => {
                assert_eq!(pid, 42);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_lookup_malformed_is_error() {
        let table = ProcessTable::new(registry());
        assert!(matches!(
            table.lookup(302),
            Err(ProcError::MalformedRecord { pid: 302, .. })
        ));
    }
}
