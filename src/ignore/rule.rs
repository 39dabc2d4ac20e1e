use globset::{GlobBuilder, GlobMatcher};
use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Origin of a rule: the file (or synthetic source) and 1-based line it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub origin: String,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(origin: impl Into<String>, line: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

/// A single compiled exclusion pattern
///
/// Supported syntax follows gitignore: `*` and `?` never cross a `/`, `**`
/// spans directories, a trailing `/` restricts the rule to directories, a
/// leading or embedded `/` anchors the pattern to its base directory, and a
/// leading `!` turns the rule into a negation. `\#` and `\!` escape the
/// special first character.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    base_path: Option<PathBuf>,
    negation: bool,
    directory_only: bool,
    anchored: bool,
    locked: bool,
    location: SourceLocation,
    matcher: GlobMatcher,
}

impl IgnoreRule {
    /// Compile one line of an exclusion file.
    ///
    /// Returns `None` for blank lines, comments, and patterns that do not form
    /// a valid glob. `base_path` is the directory the pattern is relative to;
    /// `None` means a synthetic root, so the rule applies at any depth of any
    /// path.
    pub fn compile(
        pattern_text: &str,
        base_path: Option<&Path>,
        location: SourceLocation,
    ) -> Option<Self> {
        let line = trim_line(pattern_text);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (negation, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (directory_only, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (anchored, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (body.contains('/'), body),
        };
        if body.is_empty() {
            return None;
        }

        let glob = if anchored || body.starts_with("**/") {
            body.to_string()
        } else {
            format!("**/{body}")
        };

        let matcher = match GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
        {
            Ok(glob) => glob.compile_matcher(),
            Err(e) => {
                tracing::warn!("Skipping invalid pattern {:?} at {}: {}", line, location, e);
                return None;
            }
        };

        Some(Self {
            pattern: line.to_string(),
            base_path: base_path.map(Path::to_path_buf),
            negation,
            directory_only,
            anchored,
            locked: false,
            location,
            matcher,
        })
    }

    /// Mark the rule as immune to later negations
    pub(crate) fn into_locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub(crate) fn set_line(&mut self, line: usize) {
        self.location.line = line;
    }

    /// The pattern as written, including any leading `!`
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn is_negation(&self) -> bool {
        self.negation
    }

    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Test a path against this rule.
    ///
    /// `is_dir` tells directory-only rules whether the path itself qualifies.
    /// A rule that matches one of the path's ancestor directories (below the
    /// base path) matches the path too.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        let Some(relative) = self.relative_to_base(path) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }

        if (is_dir || !self.directory_only) && self.matcher.is_match(&*relative) {
            return true;
        }

        relative
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| self.matcher.is_match(ancestor))
    }

    fn relative_to_base<'a>(&self, path: &'a Path) -> Option<Cow<'a, Path>> {
        match &self.base_path {
            Some(base) => path.strip_prefix(base).ok().map(Cow::Borrowed),
            None => Some(Cow::Owned(
                path.components()
                    .filter(|component| matches!(component, Component::Normal(_)))
                    .collect(),
            )),
        }
    }
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.pattern)
    }
}

/// Strip the line terminator and trailing spaces, keeping one escaped space
fn trim_line(line: &str) -> &str {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_end_matches(' ');
    if trimmed.ends_with('\\') && trimmed.len() < line.len() {
        &line[..trimmed.len() + 1]
    } else {
        trimmed
    }
}
