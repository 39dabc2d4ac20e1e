use super::rule::{IgnoreRule, SourceLocation};

const BUILTIN_ORIGIN: &str = "<builtin>";

/// Rules present in every rule set regardless of exclusion-file content
///
/// Version control directories compile to locked, directory-only rules that no
/// `!` pattern can re-include. Lock files compile to ordinary rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinRules {
    pub vcs_directories: Vec<String>,
    pub lock_files: Vec<String>,
}

impl Default for BuiltinRules {
    fn default() -> Self {
        Self {
            vcs_directories: vec![".git".to_string(), ".hg".to_string(), ".svn".to_string()],
            lock_files: vec![
                "package-lock.json".to_string(),
                "yarn.lock".to_string(),
                "pnpm-lock.yaml".to_string(),
                "Cargo.lock".to_string(),
                "poetry.lock".to_string(),
                "Pipfile.lock".to_string(),
                "composer.lock".to_string(),
                "Gemfile.lock".to_string(),
            ],
        }
    }
}

impl BuiltinRules {
    /// No built-in rules at all
    pub fn none() -> Self {
        Self {
            vcs_directories: Vec::new(),
            lock_files: Vec::new(),
        }
    }

    /// Compile the built-ins, anchored to a synthetic root so they apply at any depth
    pub fn rules(&self) -> Vec<IgnoreRule> {
        let vcs = self.vcs_directories.iter().map(|dir| {
            let pattern = format!("{}/", dir.trim_end_matches('/'));
            IgnoreRule::compile(&pattern, None, SourceLocation::new(BUILTIN_ORIGIN, 0))
                .map(IgnoreRule::into_locked)
        });
        let locks = self
            .lock_files
            .iter()
            .map(|name| IgnoreRule::compile(name, None, SourceLocation::new(BUILTIN_ORIGIN, 0)));

        vcs.chain(locks)
            .flatten()
            .enumerate()
            .map(|(index, mut rule)| {
                rule.set_line(index + 1);
                rule
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_builtins_cover_git_and_lock_files() {
        let rules = BuiltinRules::default().rules();
        assert!(rules.iter().any(|r| r.pattern() == ".git/" && r.is_locked()));
        assert!(rules.iter().any(|r| r.pattern() == "package-lock.json" && !r.is_locked()));
        assert!(
            rules
                .iter()
                .any(|r| r.matches(Path::new("/p/web/package-lock.json"), false))
        );
    }

    #[test]
    fn test_builtin_lines_are_numbered_in_order() {
        let rules = BuiltinRules::default().rules();
        let lines: Vec<usize> = rules.iter().map(|r| r.location().line).collect();
        assert_eq!(lines, (1..=rules.len()).collect::<Vec<_>>());
        assert!(rules.iter().all(|r| r.location().origin == BUILTIN_ORIGIN));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(BuiltinRules::none().rules().is_empty());
    }
}
