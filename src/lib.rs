/*!
 * Proj2Prompt - Generate a plain-text dump of a project for LLM prompts
 *
 * This library walks a directory tree, applies ignore-file rules, user globs
 * and built-in exclusions, and renders every remaining entry into a single
 * deterministic text blob.
 */

pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod rules;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use clipboard::{copy_to_clipboard, Clipboard, ClipboardError, SystemClipboard};
pub use config::{Args, Config};
pub use content::ContentRenderer;
pub use error::{Proj2PromptError, Result};
pub use rules::{ExclusionSpec, IgnoreRules, RuleSet};
pub use scanner::Scanner;
pub use types::{EntryKind, TraversalEntry};
pub use writer::{write_output_file, OutputBuffer};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Explore the tree described by `config` and return the rendered text
pub fn explore(config: &Config) -> Result<String> {
    Scanner::new(config)?.explore()
}
