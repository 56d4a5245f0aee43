//! File system operations backing [`RealRuntime`].

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    /// Writes and flushes to disk before returning, so a following rename
    /// never publishes a partially written file.
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = File::create(path).context("Failed to create file")?;
        file.write_all(contents).context("Failed to write to file")?;
        file.sync_all().context("Failed to sync file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context("Failed to read file to string")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).context("Failed to rename file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("apps.json");

        // Test write
        runtime.write(&file_path, b"{}").unwrap();
        assert!(runtime.exists(&file_path));

        // Test read_to_string
        let content = runtime.read_to_string(&file_path).unwrap();
        assert_eq!(content, "{}");

        // Test write overwrites
        runtime.write(&file_path, b"[]").unwrap();
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "[]");

        // Test rename
        let new_path = dir.path().join("renamed.json");
        runtime.rename(&file_path, &new_path).unwrap();
        assert!(!runtime.exists(&file_path));
        assert!(runtime.exists(&new_path));

        // Test remove_file
        runtime.remove_file(&new_path).unwrap();
        assert!(!runtime.exists(&new_path));
    }

    #[test]
    fn test_real_runtime_rename_replaces_existing_target() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let target = dir.path().join("apps.json");
        let staged = dir.path().join("apps.json.tmp");

        runtime.write(&target, b"old").unwrap();
        runtime.write(&staged, b"new").unwrap();
        runtime.rename(&staged, &target).unwrap();

        assert_eq!(runtime.read_to_string(&target).unwrap(), "new");
        assert!(!runtime.exists(&staged));
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;

        // Test read non-existent file
        let result = runtime.read_to_string(std::path::Path::new("/nonexistent/path/file.txt"));
        assert!(result.is_err());

        // Test remove non-existent file
        let result = runtime.remove_file(std::path::Path::new("/nonexistent/path/file.txt"));
        assert!(result.is_err());
    }
}
