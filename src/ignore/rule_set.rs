use std::fs;
use std::path::{Path, PathBuf};

use super::builtin::BuiltinRules;
use super::rule::{IgnoreRule, SourceLocation};
use crate::error::HablaError;

/// Ordered collection of exclusion rules
///
/// Order is significant: built-ins first, then each exclusion file in discovery
/// order (ancestors before descendants), lines in file order. When negations are
/// present the last matching rule decides; a locked rule that matches always
/// excludes.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
    has_negation: bool,
}

impl IgnoreRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a rule set from the built-in rules
    pub fn with_builtins(builtins: &BuiltinRules) -> Self {
        let mut set = Self::new();
        for rule in builtins.rules() {
            set.push(rule);
        }
        set
    }

    pub fn push(&mut self, rule: IgnoreRule) {
        self.has_negation |= rule.is_negation();
        self.rules.push(rule);
    }

    /// Compile every line of `content`, anchoring the rules to `base_path`.
    ///
    /// Returns the number of rules added.
    pub fn extend_from_str(&mut self, content: &str, base_path: &Path, origin: &str) -> usize {
        let before = self.rules.len();
        for (index, line) in content.lines().enumerate() {
            let location = SourceLocation::new(origin, index + 1);
            if let Some(rule) = IgnoreRule::compile(line, Some(base_path), location) {
                self.push(rule);
            }
        }
        self.rules.len() - before
    }

    /// Read an exclusion file and append its rules, anchored to the file's directory
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, HablaError> {
        let bytes = fs::read(path).map_err(|source| HablaError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let base_path = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(self.extend_from_str(&content, base_path, &path.display().to_string()))
    }

    /// Whether `path` is excluded, querying the filesystem for its kind
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.is_excluded_as(path, path.is_dir())
    }

    /// Whether `path` is excluded, given whether it is a directory
    pub fn is_excluded_as(&self, path: &Path, is_dir: bool) -> bool {
        self.explain(path, is_dir)
            .is_some_and(|rule| !rule.is_negation())
    }

    /// The rule that decides the outcome for `path`, if any rule matches.
    ///
    /// Without negations the first matching rule is reported. With negations
    /// the rules are folded left to right and only rules that match update the
    /// decision, so the last matching rule wins.
    pub fn explain(&self, path: &Path, is_dir: bool) -> Option<&IgnoreRule> {
        let mut decided = None;
        for rule in &self.rules {
            if !rule.matches(path, is_dir) {
                continue;
            }
            if rule.is_locked() || !self.has_negation {
                return Some(rule);
            }
            decided = Some(rule);
        }
        decided
    }

    pub fn has_negation(&self) -> bool {
        self.has_negation
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter()
    }
}

/// Build a rule set from built-ins plus the given exclusion files, in order.
///
/// Fails with [`HablaError::SourceUnreadable`] on the first file that cannot
/// be read.
pub fn build_rule_set(
    builtins: &BuiltinRules,
    sources: &[PathBuf],
) -> Result<IgnoreRuleSet, HablaError> {
    let mut set = IgnoreRuleSet::with_builtins(builtins);
    for source in sources {
        set.extend_from_file(source)?;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set_from(lines: &[&str]) -> IgnoreRuleSet {
        let mut set = IgnoreRuleSet::new();
        set.extend_from_str(&lines.join("\n"), Path::new("/repo"), "rules");
        set
    }

    #[test]
    fn test_without_negation_any_match_excludes() {
        let set = set_from(&["*.log", "build/"]);
        assert!(!set.has_negation());
        assert!(set.is_excluded_as(Path::new("/repo/app.log"), false));
        assert!(set.is_excluded_as(Path::new("/repo/build/out.txt"), false));
        assert!(!set.is_excluded_as(Path::new("/repo/src/main.rs"), false));
    }

    #[test]
    fn test_negation_resurrects_path() {
        let set = set_from(&["*.log", "!important.log"]);
        assert!(set.has_negation());
        assert!(!set.is_excluded_as(Path::new("/repo/important.log"), false));
        assert!(set.is_excluded_as(Path::new("/repo/debug.log"), false));
    }

    #[test]
    fn test_later_positive_rule_re_excludes() {
        let set = set_from(&["*.log", "!important.log", "important.log"]);
        assert!(set.is_excluded_as(Path::new("/repo/important.log"), false));
    }

    #[test]
    fn test_non_matching_rules_do_not_change_outcome() {
        let set = set_from(&["*.log", "!important.log", "*.tmp"]);
        assert!(!set.is_excluded_as(Path::new("/repo/important.log"), false));
        assert!(set.is_excluded_as(Path::new("/repo/x.tmp"), false));
    }

    #[test]
    fn test_lone_negation_does_not_exclude() {
        let set = set_from(&["!keep.txt"]);
        assert!(!set.is_excluded_as(Path::new("/repo/keep.txt"), false));
        assert!(!set.is_excluded_as(Path::new("/repo/other.txt"), false));
    }

    #[test]
    fn test_locked_builtin_cannot_be_negated() {
        let mut set = IgnoreRuleSet::with_builtins(&BuiltinRules::default());
        set.extend_from_str("!.git/\n!package-lock.json\n", Path::new("/repo"), ".gitignore");
        assert!(set.is_excluded_as(Path::new("/repo/.git"), true));
        assert!(!set.is_excluded_as(Path::new("/repo/package-lock.json"), false));
    }

    #[test]
    fn test_explain_reports_deciding_rule() {
        let set = set_from(&["*.log", "!important.log"]);
        let rule = set.explain(Path::new("/repo/important.log"), false).unwrap();
        assert!(rule.is_negation());
        assert_eq!(rule.location().line, 2);
        assert!(set.explain(Path::new("/repo/readme.md"), false).is_none());
    }

    #[test]
    fn test_deeper_file_rules_win_by_order() {
        let mut set = IgnoreRuleSet::new();
        set.extend_from_str("*.txt\n", Path::new("/repo"), "/repo/.gitignore");
        set.extend_from_str("!notes.txt\n", Path::new("/repo/docs"), "/repo/docs/.gitignore");
        assert!(!set.is_excluded_as(Path::new("/repo/docs/notes.txt"), false));
        assert!(set.is_excluded_as(Path::new("/repo/notes.txt"), false));
    }

    #[test]
    fn test_build_rule_set_reads_sources_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join(".gitignore"), "# comment\n\n*.log\n").unwrap();
        fs::write(root.join("sub/.gitignore"), "!keep.log\n").unwrap();

        let sources = vec![root.join(".gitignore"), root.join("sub/.gitignore")];
        let set = build_rule_set(&BuiltinRules::none(), &sources).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().location().line, 3);
        assert!(set.is_excluded_as(&root.join("sub/drop.log"), false));
        assert!(!set.is_excluded_as(&root.join("sub/keep.log"), false));
        // the negation is anchored to sub/, so it does not reach the parent
        assert!(set.is_excluded_as(&root.join("keep.log"), false));
    }

    #[test]
    fn test_build_rule_set_fails_on_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join(".gitignore");
        let err = build_rule_set(&BuiltinRules::default(), &[missing.clone()]).unwrap_err();
        match err {
            HablaError::SourceUnreadable { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
