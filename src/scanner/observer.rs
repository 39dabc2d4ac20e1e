//! Scan observers
//!
//! The scanner never logs or counts on its own; it reports what it sees to an
//! injected [`ScanObserver`]. Every method defaults to a no-op.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::types::ScanStats;
use crate::error::HablaError;
use crate::ignore::IgnoreRule;

/// Why a file contributed nothing to the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Sniffed as something other than text
    NotText { mime_type: &'static str },
    /// Empty or could not be opened for sniffing
    Unclassifiable,
    /// Classified as text but reading it failed
    Unreadable,
    /// An exclusion file; these configure the scan and are never part of the context
    ExclusionFile,
    /// Not a regular file (socket, FIFO, device, unfollowed symlink)
    NotRegular,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotText { mime_type } => write!(f, "not human-readable ({mime_type})"),
            SkipReason::Unclassifiable => write!(f, "could not be classified"),
            SkipReason::Unreadable => write!(f, "could not be read"),
            SkipReason::ExclusionFile => write!(f, "exclusion file"),
            SkipReason::NotRegular => write!(f, "not a regular file"),
        }
    }
}

pub trait ScanObserver: Send + Sync {
    fn exclusion_file_found(&self, _path: &Path) {}

    /// A discovered exclusion file could not be read; the scan continues without it
    fn source_unreadable(&self, _error: &HablaError) {}

    fn path_excluded(&self, _path: &Path, _rule: &IgnoreRule) {}

    fn file_included(&self, _relative_path: &str, _characters: usize) {}

    fn file_skipped(&self, _path: &Path, _reason: SkipReason) {}

    /// A directory could not be listed or a node could not be inspected
    fn node_unreadable(&self, _path: &Path, _error: &io::Error) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn exclusion_file_found(&self, path: &Path) {
        tracing::info!("Using {} to ignore files.", path.display());
    }

    fn source_unreadable(&self, error: &HablaError) {
        tracing::warn!("{}", error);
    }

    fn path_excluded(&self, path: &Path, rule: &IgnoreRule) {
        tracing::trace!("Excluding {} ({})", path.display(), rule);
    }

    fn file_included(&self, relative_path: &str, characters: usize) {
        tracing::debug!("{} characters in {}", characters, relative_path);
    }

    fn file_skipped(&self, path: &Path, reason: SkipReason) {
        tracing::debug!("Skipping {}: {}", path.display(), reason);
    }

    fn node_unreadable(&self, path: &Path, error: &io::Error) {
        tracing::debug!("Cannot read {}: {}", path.display(), error);
    }
}

/// Observer that tallies [`ScanStats`]
#[derive(Debug, Default)]
pub struct StatsObserver {
    stats: Mutex<ScanStats>,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the counters collected so far
    pub fn snapshot(&self) -> ScanStats {
        match self.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut ScanStats)) {
        let mut stats = match self.stats.lock() {
            Ok(stats) => stats,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut stats);
    }
}

impl ScanObserver for StatsObserver {
    fn exclusion_file_found(&self, _path: &Path) {
        self.update(|stats| stats.exclusion_files_found += 1);
    }

    fn source_unreadable(&self, _error: &HablaError) {
        self.update(|stats| stats.unreadable_sources += 1);
    }

    fn path_excluded(&self, _path: &Path, _rule: &IgnoreRule) {
        self.update(|stats| stats.paths_excluded += 1);
    }

    fn file_included(&self, _relative_path: &str, characters: usize) {
        self.update(|stats| {
            stats.files_included += 1;
            stats.characters += characters;
        });
    }

    fn file_skipped(&self, _path: &Path, _reason: SkipReason) {
        self.update(|stats| stats.files_skipped += 1);
    }

    fn node_unreadable(&self, _path: &Path, _error: &io::Error) {
        self.update(|stats| stats.unreadable_nodes += 1);
    }
}

impl<T: ScanObserver + ?Sized> ScanObserver for Arc<T> {
    fn exclusion_file_found(&self, path: &Path) {
        (**self).exclusion_file_found(path)
    }

    fn source_unreadable(&self, error: &HablaError) {
        (**self).source_unreadable(error)
    }

    fn path_excluded(&self, path: &Path, rule: &IgnoreRule) {
        (**self).path_excluded(path, rule)
    }

    fn file_included(&self, relative_path: &str, characters: usize) {
        (**self).file_included(relative_path, characters)
    }

    fn file_skipped(&self, path: &Path, reason: SkipReason) {
        (**self).file_skipped(path, reason)
    }

    fn node_unreadable(&self, path: &Path, error: &io::Error) {
        (**self).node_unreadable(path, error)
    }
}

/// Fan out to two observers, first then second
impl<A: ScanObserver, B: ScanObserver> ScanObserver for (A, B) {
    fn exclusion_file_found(&self, path: &Path) {
        self.0.exclusion_file_found(path);
        self.1.exclusion_file_found(path);
    }

    fn source_unreadable(&self, error: &HablaError) {
        self.0.source_unreadable(error);
        self.1.source_unreadable(error);
    }

    fn path_excluded(&self, path: &Path, rule: &IgnoreRule) {
        self.0.path_excluded(path, rule);
        self.1.path_excluded(path, rule);
    }

    fn file_included(&self, relative_path: &str, characters: usize) {
        self.0.file_included(relative_path, characters);
        self.1.file_included(relative_path, characters);
    }

    fn file_skipped(&self, path: &Path, reason: SkipReason) {
        self.0.file_skipped(path, reason);
        self.1.file_skipped(path, reason);
    }

    fn node_unreadable(&self, path: &Path, error: &io::Error) {
        self.0.node_unreadable(path, error);
        self.1.node_unreadable(path, error);
    }
}
