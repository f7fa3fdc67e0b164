use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// An output file that only appears at its destination once complete.
///
/// Content is written to a temporary file next to the destination and moved
/// into place by [`AtomicOutput::commit`]. Dropping without committing removes
/// the temporary file and leaves the destination untouched.
pub struct AtomicOutput {
    temp: TempPath,
    destination: PathBuf,
}

impl AtomicOutput {
    pub fn new(destination: &Path) -> Result<Self> {
        let dir = ensure_parent_dir(destination)?;
        let suffix = destination
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(".bamurai-")
            .suffix(&suffix)
            .tempfile_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?
            .into_temp_path();

        Ok(Self {
            temp,
            destination: destination.to_path_buf(),
        })
    }

    /// Where writers should put the content.
    pub fn path(&self) -> &Path {
        &self.temp
    }

    pub fn commit(self) -> Result<()> {
        let destination = self.destination;
        self.temp
            .persist(&destination)
            .with_context(|| format!("Failed to move output into {}", destination.display()))?;
        Ok(())
    }
}

/// Create the directory that will hold `path`, returning it.
pub fn ensure_parent_dir(path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    Ok(dir)
}
