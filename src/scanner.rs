/*!
 * Directory traversal producing the prompt text
 */

use std::fs;
use std::path::PathBuf;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::content::ContentRenderer;
use crate::error::{Proj2PromptError, Result};
use crate::rules::RuleSet;
use crate::types::{EntryKind, TraversalEntry};
use crate::utils::{file_name, relative_display};
use crate::writer::OutputBuffer;

/// Depth-first, name-ordered walker over one root directory
pub struct Scanner {
    /// Canonical root of the traversal
    root: PathBuf,
    /// Exclusion predicate
    rules: RuleSet,
    /// File content renderer
    renderer: ContentRenderer,
}

impl Scanner {
    /// Create a scanner for `config.root`, loading its ignore-file
    pub fn new(config: &Config) -> Result<Self> {
        let root =
            fs::canonicalize(&config.root).map_err(|e| Proj2PromptError::io(&config.root, e))?;
        let rules = RuleSet::new(config, &root);
        debug!(
            "exploring {} (ignore-file active: {})",
            root.display(),
            rules.has_ignore_rules()
        );

        Ok(Self::with_rules(root, rules, config.mark_truncated))
    }

    /// Create a scanner with prebuilt rules
    pub fn with_rules(root: PathBuf, rules: RuleSet, mark_truncated: bool) -> Self {
        Self {
            root,
            rules,
            renderer: ContentRenderer::new(mark_truncated),
        }
    }

    /// Walk the tree and return the rendered text.
    ///
    /// Any filesystem error aborts the whole traversal.
    pub fn explore(&self) -> Result<String> {
        let mut output = OutputBuffer::new();
        let mut walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;

            if entry.depth() > 0 && self.is_excluded(&entry) {
                if entry.file_type().is_dir() {
                    debug!("pruning {}", entry.path().display());
                    walker.skip_current_dir();
                } else {
                    debug!("skipping {}", entry.path().display());
                }
                continue;
            }

            let visited = self.visit(&entry)?;
            if visited.kind.is_dir() {
                output.push_directory(&visited.relative_path);
            } else {
                let content = self.render(&visited)?;
                output.push_file(&visited.relative_path, &content);
            }
        }

        Ok(output.into_string())
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.rules
            .is_excluded(path, relative, entry.file_type().is_dir())
    }

    /// Resolve what the entry is and how large it is
    fn visit(&self, entry: &DirEntry) -> Result<TraversalEntry> {
        let path = entry.path();
        let file_type = entry.file_type();

        let (kind, size) = if file_type.is_dir() {
            (EntryKind::Directory, 0)
        } else if file_type.is_symlink() {
            // Broken links fail here
            let target = fs::metadata(path).map_err(|e| Proj2PromptError::io(path, e))?;
            if target.is_dir() {
                (EntryKind::DirectoryLink, 0)
            } else if target.is_file() {
                (EntryKind::FileLink, target.len())
            } else {
                (EntryKind::Special, 0)
            }
        } else if file_type.is_file() {
            let metadata = entry.metadata()?;
            (EntryKind::File, metadata.len())
        } else {
            (EntryKind::Special, 0)
        };

        Ok(TraversalEntry {
            path: path.to_path_buf(),
            relative_path: relative_display(&self.root, path),
            name: file_name(path),
            kind,
            size,
        })
    }

    fn render(&self, entry: &TraversalEntry) -> Result<String> {
        match entry.kind {
            EntryKind::File | EntryKind::FileLink => self.renderer.render(&entry.path, entry.size),
            EntryKind::DirectoryLink => {
                let target =
                    fs::read_link(&entry.path).map_err(|e| Proj2PromptError::io(&entry.path, e))?;
                Ok(format!("[Symlink: {} -> {}]", entry.name, target.display()))
            }
            EntryKind::Special => Ok(format!("[Special file: {}]", entry.name)),
            EntryKind::Directory => Ok(String::new()),
        }
    }
}
