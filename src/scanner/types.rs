use serde::{Deserialize, Serialize};

use crate::ignore::BuiltinRules;

/// Aggregated output of a scan: a character count and the delimited context blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub total_characters: usize,
    pub context: String,
}

impl ScanResult {
    /// Wrap one file's content in the delimiter format downstream prompt assembly expects
    pub fn fragment(relative_path: &str, content: &str) -> Self {
        let context = format!(
            "\n\n--- Contents of file {relative_path} ---\n```\n{content}\n```\n--- End of file {relative_path} ---\n\n"
        );
        Self {
            total_characters: content.chars().count(),
            context,
        }
    }

    /// Append a child's result after this one's
    pub fn merge(&mut self, other: ScanResult) {
        self.total_characters += other.total_characters;
        self.context.push_str(&other.context);
    }

    pub fn is_empty(&self) -> bool {
        self.total_characters == 0 && self.context.is_empty()
    }

    /// Whether the scanned characters exceed a downstream budget
    pub fn exceeds(&self, max_characters: usize) -> bool {
        self.total_characters > max_characters
    }
}

/// Counters collected by [`super::StatsObserver`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_included: usize,
    pub files_skipped: usize,
    pub paths_excluded: usize,
    pub exclusion_files_found: usize,
    pub unreadable_sources: usize,
    pub unreadable_nodes: usize,
    pub characters: usize,
}

/// Configuration for the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Directory levels below the root the scan may descend into
    pub max_depth: usize,
    /// Follow symbolic links to files and directories
    pub follow_symlinks: bool,
    /// Exclusion file names looked up in every directory, in discovery order
    pub exclusion_files: Vec<String>,
    /// Version control directories, excluded without possible re-inclusion
    pub vcs_directories: Vec<String>,
    /// Lock files excluded by default
    pub lock_files: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let builtins = BuiltinRules::default();
        Self {
            max_depth: 10,
            follow_symlinks: true,
            exclusion_files: vec![".gitignore".to_string(), ".hablaignore".to_string()],
            vcs_directories: builtins.vcs_directories,
            lock_files: builtins.lock_files,
        }
    }
}

impl ScannerConfig {
    pub fn builtin_rules(&self) -> BuiltinRules {
        BuiltinRules {
            vcs_directories: self.vcs_directories.clone(),
            lock_files: self.lock_files.clone(),
        }
    }
}
