/*!
 * Configuration handling for proj2prompt
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::bail_config;
use crate::error::Result;

/// Command-line arguments for proj2prompt
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "proj2prompt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Proj2Prompt generates a project structure for LLM prompts",
    long_about = "Walks a directory tree and prints its structure together with the content of every text file, ready to paste into a Large Language Model prompt."
)]
pub struct Args {
    /// Directory to explore
    #[clap(default_value = ".")]
    pub directory: String,

    /// Save the output to a file
    #[clap(short = 'o', long)]
    pub output: Option<String>,

    /// Add file/directory exclusion rules (glob matched against the entry name)
    #[clap(short = 'e', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Copy output to clipboard
    #[clap(short = 'c', long)]
    pub clipboard: bool,

    /// Use this ignore-file instead of <DIRECTORY>/.gitignore
    #[clap(long, conflicts_with = "no_ignore")]
    pub ignore_file: Option<String>,

    /// Do not read any ignore-file
    #[clap(long)]
    pub no_ignore: bool,

    /// Append a marker to text files cut at the sample limit
    #[clap(long)]
    pub mark_truncated: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the traversal
    pub root: PathBuf,

    /// Glob patterns matched against entry names
    pub exclude_patterns: Vec<String>,

    /// Output file path, never part of its own output
    pub output_file: Option<PathBuf>,

    /// Copy output to clipboard
    pub clipboard: bool,

    /// Whether to load an ignore-file at all
    pub respect_ignore_file: bool,

    /// Custom ignore-file used in place of `<root>/.gitignore`
    pub ignore_file: Option<PathBuf>,

    /// Mark text files cut at the sample limit
    pub mark_truncated: bool,
}

impl Config {
    /// Default configuration for a root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_patterns: Vec::new(),
            output_file: None,
            clipboard: false,
            respect_ignore_file: true,
            ignore_file: None,
            mark_truncated: false,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            root: PathBuf::from(args.directory),
            exclude_patterns: args.exclude,
            output_file: args.output.map(PathBuf::from),
            clipboard: args.clipboard,
            respect_ignore_file: !args.no_ignore,
            ignore_file: args.ignore_file.map(PathBuf::from),
            mark_truncated: args.mark_truncated,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            bail_config!("directory not found: {}", self.root.display());
        }

        if let Some(parent) = self.output_file.as_ref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail_config!("output directory not found: {}", parent.display());
            }
        }

        if let Some(path) = &self.ignore_file {
            if !path.is_file() {
                bail_config!("ignore-file not found: {}", path.display());
            }
        }

        Ok(())
    }

    /// Whether the text should go to stdout
    pub fn prints_to_stdout(&self) -> bool {
        self.output_file.is_none() && !self.clipboard
    }
}
