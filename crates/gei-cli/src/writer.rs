//! Persisting generated scripts.

use std::path::Path;

use anyhow::{Context, Result};

/// Default output path.
pub const DEFAULT_OUTPUT: &str = "./migrate.ps1";

/// Write `script` to `path` and make it executable.
pub fn write_script(path: &Path, script: &str) -> Result<()> {
    std::fs::write(path, script)
        .with_context(|| format!("failed to write script to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("failed to make {} executable", path.display()))?;
    }

    Ok(())
}
