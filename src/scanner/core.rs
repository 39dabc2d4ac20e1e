use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::observer::{ScanObserver, SkipReason, TracingObserver};
use super::text_detection::{self, ContentClass};
use super::types::{ScanResult, ScannerConfig};
use crate::error::HablaError;
use crate::ignore::IgnoreRuleSet;

/// Depth-first, depth-bounded scanner that folds readable files into one context blob
///
/// Every directory re-reads the exclusion files active for it: its ancestors'
/// plus any found in the directory itself. Each recursive call receives its own
/// list, so sibling subtrees never see each other's exclusion files.
#[derive(Clone)]
pub struct Scanner {
    config: ScannerConfig,
    builtin_rules: IgnoreRuleSet,
    observer: Arc<dyn ScanObserver>,
}

/// A directory entry, resolved once during listing
struct Child {
    path: PathBuf,
    is_dir: bool,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: ScannerConfig, observer: Arc<dyn ScanObserver>) -> Self {
        let builtin_rules = IgnoreRuleSet::with_builtins(&config.builtin_rules());
        Self {
            config,
            builtin_rules,
            observer,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan `root` (a file or a directory) descending at most `max_depth` directory levels.
    ///
    /// Fails only when `root` does not exist. Everything that goes wrong below
    /// the root degrades to an empty contribution from the affected node.
    pub fn scan_path(&self, root: &Path, max_depth: usize) -> Result<ScanResult, HablaError> {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        if let Err(e) = fs::metadata(&root) {
            if e.kind() == io::ErrorKind::NotFound {
                return Err(HablaError::RootNotFound { path: root });
            }
        }

        tracing::debug!("Scanning {} with max depth {}", root.display(), max_depth);
        Ok(self.scan(&root, &root, max_depth, &[]))
    }

    /// Scan one node of the tree.
    ///
    /// `root` is the original scan root, used for relative paths in the
    /// context. `active_sources` are the exclusion files inherited from the
    /// ancestors of `current`; the slice is never modified.
    pub fn scan(
        &self,
        root: &Path,
        current: &Path,
        remaining_depth: usize,
        active_sources: &[PathBuf],
    ) -> ScanResult {
        let metadata = match fs::metadata(current) {
            Ok(metadata) => metadata,
            Err(e) => {
                self.observer.node_unreadable(current, &e);
                return ScanResult::default();
            }
        };

        if metadata.is_file() {
            return self.scan_file(root, current);
        }
        if !metadata.is_dir() {
            self.observer.file_skipped(current, SkipReason::NotRegular);
            return ScanResult::default();
        }
        if remaining_depth == 0 {
            return ScanResult::default();
        }

        let sources = self.discover_sources(current, active_sources);
        let rules = self.rule_set(&sources);

        let children = match self.list_children(current) {
            Ok(children) => children,
            Err(e) => {
                self.observer.node_unreadable(current, &e);
                return ScanResult::default();
            }
        };

        let mut result = ScanResult::default();
        for child in children {
            if !child.is_dir && self.is_exclusion_file(&child.path) {
                self.observer.file_skipped(&child.path, SkipReason::ExclusionFile);
                continue;
            }
            if let Some(rule) = rules.explain(&child.path, child.is_dir) {
                if !rule.is_negation() {
                    self.observer.path_excluded(&child.path, rule);
                    continue;
                }
            }
            result.merge(self.scan(root, &child.path, remaining_depth - 1, &sources));
        }
        result
    }

    /// Exclusion files active for `path` when scanning from `root`.
    ///
    /// Walks the directories from `root` down to the parent of `path`, in the
    /// same order a scan would discover them.
    pub fn sources_for(&self, root: &Path, path: &Path) -> Vec<PathBuf> {
        let Some(parent) = path.parent() else {
            return Vec::new();
        };
        let Ok(below_root) = parent.strip_prefix(root) else {
            return Vec::new();
        };

        let mut directory = root.to_path_buf();
        let mut sources = self.discover_sources(&directory, &[]);
        for component in below_root.components() {
            directory.push(component);
            sources = self.discover_sources(&directory, &sources);
        }
        sources
    }

    /// Rule set built from the built-ins plus `sources`, skipping unreadable files
    pub fn rule_set(&self, sources: &[PathBuf]) -> IgnoreRuleSet {
        let mut rules = self.builtin_rules.clone();
        for source in sources {
            if let Err(e) = rules.extend_from_file(source) {
                self.observer.source_unreadable(&e);
            }
        }
        rules
    }

    /// Copy of `inherited` extended with the exclusion files present in `directory`
    fn discover_sources(&self, directory: &Path, inherited: &[PathBuf]) -> Vec<PathBuf> {
        let mut sources = inherited.to_vec();
        for name in &self.config.exclusion_files {
            let candidate = directory.join(name);
            if candidate.is_file() {
                self.observer.exclusion_file_found(&candidate);
                sources.push(candidate);
            }
        }
        sources
    }

    fn is_exclusion_file(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            self.config
                .exclusion_files
                .iter()
                .any(|exclusion| name == exclusion.as_str())
        })
    }

    /// Immediate children of `directory`, sorted by file name
    fn list_children(&self, directory: &Path) -> io::Result<Vec<Child>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.observer.node_unreadable(directory, &e);
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    self.observer.node_unreadable(&path, &e);
                    continue;
                }
            };

            let is_dir = if file_type.is_symlink() {
                if !self.config.follow_symlinks {
                    self.observer.file_skipped(&path, SkipReason::NotRegular);
                    continue;
                }
                path.is_dir()
            } else {
                file_type.is_dir()
            };
            children.push(Child { path, is_dir });
        }
        children.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(children)
    }

    fn scan_file(&self, root: &Path, path: &Path) -> ScanResult {
        let encoding = match text_detection::sniff(path) {
            ContentClass::Text(encoding) => encoding,
            ContentClass::Empty | ContentClass::Unknown => {
                self.observer.file_skipped(path, SkipReason::Unclassifiable);
                return ScanResult::default();
            }
            other => {
                let reason = SkipReason::NotText {
                    mime_type: other.mime_type(),
                };
                self.observer.file_skipped(path, reason);
                return ScanResult::default();
            }
        };

        let content = match text_detection::read_text(path, encoding) {
            Ok(content) => content,
            Err(e) => {
                tracing::trace!("Read failed for {}: {}", path.display(), e);
                self.observer.file_skipped(path, SkipReason::Unreadable);
                return ScanResult::default();
            }
        };

        let relative_path = relative_display(root, path);
        let fragment = ScanResult::fragment(&relative_path, &content);
        self.observer
            .file_included(&relative_path, fragment.total_characters);
        fragment
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

/// Path of `path` relative to the scan root; a file root is shown relative to its parent
fn relative_display(root: &Path, path: &Path) -> String {
    let base = if root == path {
        root.parent().unwrap_or(root)
    } else {
        root
    };
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
