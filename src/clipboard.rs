/*!
 * Clipboard support for proj2prompt
 *
 * Pipes the generated text into the first platform clipboard command that
 * is installed and accepts it.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// A clipboard command could not be run or reported failure
    #[error("{command}: {reason}")]
    CommandFailed { command: String, reason: String },

    /// No suitable clipboard mechanism was found
    #[error("no clipboard mechanism found")]
    NoClipboardFound,

    /// IO error while talking to the clipboard command
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Trait for clipboard sinks
pub trait Clipboard {
    /// Place `text` on the clipboard
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Known clipboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOS,
    Windows,
    Termux,
}

impl Provider {
    fn command(self) -> (&'static str, Vec<&'static str>) {
        match self {
            Self::Tmux => ("tmux", vec!["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", vec![]),
            Self::Xsel => ("xsel", vec!["-b", "-i"]),
            Self::Xclip => ("xclip", vec!["-selection", "clipboard", "-in"]),
            Self::MacOS => ("pbcopy", vec![]),
            Self::Windows => ("clip.exe", vec![]),
            Self::Termux => ("termux-clipboard-set", vec![]),
        }
    }

    /// Providers worth trying on this platform, in order of preference
    fn candidates() -> Vec<Provider> {
        let mut providers = Vec::new();

        if env::var_os("TMUX").is_some() {
            providers.push(Self::Tmux);
        }

        if cfg!(target_os = "macos") {
            providers.push(Self::MacOS);
        } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
            providers.push(Self::Windows);
        } else if cfg!(target_os = "android") {
            providers.push(Self::Termux);
        } else {
            providers.extend([Self::Wayland, Self::Xsel, Self::Xclip]);
        }

        providers
            .into_iter()
            .filter(|provider| command_exists(provider.command().0))
            .collect()
    }
}

impl Clipboard for Provider {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let (command, args) = self.command();
        let failed = |reason: String| ClipboardError::CommandFailed {
            command: command.to_string(),
            reason,
        };

        let mut child = Command::new(command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        // stdin is dropped at the end of this block so the command sees EOF
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| failed("stdin unavailable".to_string()))?;
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {}", status)))
        }
    }
}

/// The system clipboard, reached through whichever command is available
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = None;

        for provider in Provider::candidates() {
            match provider.copy(text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("clipboard provider {:?} failed: {}", provider, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
    }
}

/// Copy text to the system clipboard
///
/// Tries every clipboard command installed for this platform, tmux first
/// when running inside a session, and stops at the first one that accepts
/// the text.
///
/// # Arguments
/// * `text` - The text to copy to the clipboard
///
/// # Returns
/// * `Ok(())` - If one of the clipboard commands accepted the text
/// * `Err(ClipboardError::NoClipboardFound)` - If no clipboard command is installed
/// * `Err(ClipboardError)` - The last failure when every command was tried
///
/// # Examples
/// ```no_run
/// use proj2prompt::clipboard::copy_to_clipboard;
///
/// if let Err(e) = copy_to_clipboard("Hello, clipboard!") {
///     eprintln!("Failed to copy to clipboard: {}", e);
/// }
/// ```
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    SystemClipboard.copy(text)
}

/// Check if a command exists on the system
///
/// Only `PATH` is searched; the command is never executed.
///
/// # Arguments
/// * `command` - The command name, without directory
///
/// # Returns
/// * `true` - If an executable file of that name is on `PATH`
/// * `false` - Otherwise
///
/// # Examples
/// ```
/// use proj2prompt::clipboard::command_exists;
///
/// assert!(!command_exists("nonexistentcommandxyz"));
/// ```
pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(command);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}
