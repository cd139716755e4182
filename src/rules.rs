/*!
 * Exclusion rules: ignore-file, user globs and built-in exclusions
 */

use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use crate::config::Config;
use crate::utils::file_name;

/// Name of the ignore-file looked up at the traversal root
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Version-control metadata directory, always excluded
pub const VCS_METADATA_DIR: &str = ".git";

/// Compiled ignore-file rules
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Load `<root>/.gitignore`, if present
    pub fn load(root: &Path) -> Option<Self> {
        Self::load_from(root, &root.join(IGNORE_FILE_NAME))
    }

    /// Load rules from `file`, interpreting its patterns relative to `root`.
    ///
    /// A single line that fails to compile drops the whole file; partial
    /// rule sets are never returned.
    ///
    /// # Arguments
    /// * `root` - Directory the patterns are anchored to
    /// * `file` - Ignore-file in standard `.gitignore` syntax
    ///
    /// # Returns
    /// * `Some(IgnoreRules)` - If the file exists and every line compiled
    /// * `None` - If the file is absent, unreadable or malformed; the last
    ///   two cases are logged as warnings
    ///
    /// # Examples
    /// ```no_run
    /// use std::path::Path;
    /// use proj2prompt::rules::IgnoreRules;
    ///
    /// let root = Path::new("project");
    /// if let Some(rules) = IgnoreRules::load_from(root, &root.join(".promptignore")) {
    ///     assert!(!rules.matches(Path::new("src/main.rs"), false));
    /// }
    /// ```
    pub fn load_from(root: &Path, file: &Path) -> Option<Self> {
        if !file.is_file() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(file) {
            warn!("failed to compile {}: {}", file.display(), err);
            return None;
        }

        match builder.build() {
            Ok(matcher) => {
                debug!(
                    "loaded {} ignore and {} whitelist rules from {}",
                    matcher.num_ignores(),
                    matcher.num_whitelists(),
                    file.display()
                );
                Some(Self { matcher })
            }
            Err(err) => {
                warn!("failed to compile {}: {}", file.display(), err);
                None
            }
        }
    }

    /// Whether `relative_path` is ignored, honoring negation and
    /// directory-only patterns
    pub fn matches(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(relative_path, is_dir).is_ignore()
    }
}

/// Caller-supplied glob patterns matched against base names
#[derive(Debug, Clone, Default)]
pub struct ExclusionSpec {
    patterns: Vec<String>,
}

impl ExclusionSpec {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Whether `name` matches any pattern
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| glob_match(pattern, name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The full exclusion predicate consulted by the scanner
#[derive(Debug, Clone)]
pub struct RuleSet {
    ignore: Option<IgnoreRules>,
    user: ExclusionSpec,
    output_file: Option<PathBuf>,
}

impl RuleSet {
    /// Build the rules for a traversal of `root` (expected canonical)
    pub fn new(config: &Config, root: &Path) -> Self {
        let ignore = if !config.respect_ignore_file {
            None
        } else if let Some(custom) = &config.ignore_file {
            IgnoreRules::load_from(root, custom)
        } else {
            IgnoreRules::load(root)
        };

        Self {
            ignore,
            user: ExclusionSpec::new(config.exclude_patterns.clone()),
            output_file: config.output_file.as_deref().and_then(resolve_output),
        }
    }

    /// Build rules directly from their parts
    pub fn from_parts(ignore: Option<IgnoreRules>, user: ExclusionSpec) -> Self {
        Self {
            ignore,
            user,
            output_file: None,
        }
    }

    /// Whether an ignore-file is active
    pub fn has_ignore_rules(&self) -> bool {
        self.ignore.is_some()
    }

    /// Decide whether an entry is excluded.
    ///
    /// The entry is excluded when any of these holds:
    /// * it is a `.git` directory
    /// * the ignore-file matches `relative`
    /// * a user glob matches its base name
    /// * `path` is the output file
    ///
    /// # Arguments
    /// * `path` - Entry path as produced by the walker
    /// * `relative` - The same path relative to the traversal root
    /// * `is_dir` - Whether the entry is a directory (not following links)
    pub fn is_excluded(&self, path: &Path, relative: &Path, is_dir: bool) -> bool {
        let name = file_name(path);

        let builtin = is_dir && name == VCS_METADATA_DIR;
        let ignored = self
            .ignore
            .as_ref()
            .is_some_and(|rules| rules.matches(relative, is_dir));
        let user = self.user.matches(&name);
        let output = self.output_file.as_deref() == Some(path);

        builtin || ignored || user || output
    }
}

/// Absolute location of the output file, if its directory exists
fn resolve_output(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|dir| dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn rules_from(content: &str) -> (tempfile::TempDir, Option<IgnoreRules>) {
        let temp_dir = tempdir().unwrap();
        let mut file = File::create(temp_dir.path().join(IGNORE_FILE_NAME)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let rules = IgnoreRules::load(temp_dir.path());
        (temp_dir, rules)
    }

    #[test]
    fn test_missing_ignore_file_is_none() {
        let temp_dir = tempdir().unwrap();
        assert!(IgnoreRules::load(temp_dir.path()).is_none());
    }

    #[test]
    fn test_negation_reincludes() {
        let (_dir, rules) = rules_from("*.log\n!keep.log\n");
        let rules = rules.unwrap();

        assert!(rules.matches(Path::new("other.log"), false));
        assert!(!rules.matches(Path::new("keep.log"), false));
        assert!(!rules.matches(Path::new("main.rs"), false));
    }

    #[test]
    fn test_directory_only_pattern() {
        let (_dir, rules) = rules_from("# build output\nbuild/\n");
        let rules = rules.unwrap();

        assert!(rules.matches(Path::new("build"), true));
        assert!(!rules.matches(Path::new("build"), false));
    }

    #[test]
    fn test_anchored_pattern_is_relative_to_root() {
        let (_dir, rules) = rules_from("/notes.txt\n");
        let rules = rules.unwrap();

        assert!(rules.matches(Path::new("notes.txt"), false));
        assert!(!rules.matches(Path::new("docs/notes.txt"), false));
    }

    #[test]
    fn test_malformed_ignore_file_is_dropped() {
        // Reversed ranges and unclosed alternates are rejected by globset
        for broken in ["[z-a]", "{a,"] {
            let (_dir, rules) = rules_from(&format!("valid.txt\n{}\n", broken));
            assert!(
                rules.is_none(),
                "fixture {:?} compiled; pick a pattern globset rejects",
                broken
            );
        }
    }

    #[test]
    fn test_user_patterns_match_base_name() {
        let spec = ExclusionSpec::new(vec!["*.tmp".to_string(), "data?.csv".to_string()]);

        assert!(spec.matches("cache.tmp"));
        assert!(spec.matches("data1.csv"));
        assert!(!spec.matches("data10.csv"));
        assert!(!spec.matches("src/cache.rs"));
        assert!(ExclusionSpec::default().is_empty());
    }

    #[test]
    fn test_character_class() {
        let spec = ExclusionSpec::new(vec!["file[0-9].txt".to_string()]);
        assert!(spec.matches("file7.txt"));
        assert!(!spec.matches("fileA.txt"));
    }

    #[test]
    fn test_vcs_directory_always_excluded() {
        let rules = RuleSet::from_parts(None, ExclusionSpec::default());
        let root = Path::new("/project");

        assert!(rules.is_excluded(&root.join(".git"), Path::new(".git"), true));
        assert!(rules.is_excluded(
            &root.join("vendor/lib/.git"),
            Path::new("vendor/lib/.git"),
            true
        ));
        assert!(!rules.is_excluded(&root.join("src"), Path::new("src"), true));
    }

    #[test]
    fn test_user_glob_applies_to_nested_entries() {
        let rules = RuleSet::from_parts(None, ExclusionSpec::new(vec!["*.tmp".to_string()]));
        let root = Path::new("/project");

        assert!(rules.is_excluded(&root.join("a/b/x.tmp"), Path::new("a/b/x.tmp"), false));
        assert!(!rules.is_excluded(&root.join("a/b/x.txt"), Path::new("a/b/x.txt"), false));
    }

    #[test]
    fn test_output_file_is_excluded() {
        let temp_dir = tempdir().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let config = Config {
            output_file: Some(root.join("prompt.txt")),
            ..Config::new(&root)
        };
        let rules = RuleSet::new(&config, &root);

        assert!(rules.is_excluded(&root.join("prompt.txt"), Path::new("prompt.txt"), false));
        assert!(!rules.is_excluded(
            &root.join("sub").join("prompt.txt"),
            Path::new("sub/prompt.txt"),
            false
        ));
    }

    #[test]
    fn test_ignore_file_can_be_disabled() {
        let (dir, _) = rules_from("*.log\n");
        let root = fs::canonicalize(dir.path()).unwrap();

        let config = Config {
            respect_ignore_file: false,
            ..Config::new(&root)
        };
        assert!(!RuleSet::new(&config, &root).has_ignore_rules());
        assert!(RuleSet::new(&Config::new(&root), &root).has_ignore_rules());
    }
}
