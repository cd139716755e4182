/*!
 * Utility functions for proj2prompt
 */

use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators on every platform.
///
/// The root itself renders as `.`. Paths outside `root` fall back to their
/// own components.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Base name of a path, lossily decoded
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
