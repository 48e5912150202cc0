//! Output path handling.

use std::path::Path;

use tracing::debug;

/// Create the parent directory of `path` (and its ancestors) if needed.
///
/// A bare file name has no parent component and is written to the working
/// directory, so nothing is created for it.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            debug!(dir = %parent.display(), "Ensured output directory");
            Ok(())
        }
        _ => Ok(()),
    }
}
