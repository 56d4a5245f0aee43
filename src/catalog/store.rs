use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::runtime::Runtime;

use super::{CatalogEntry, CatalogError, merge};

/// Single-writer access to the catalog file.
///
/// Every update runs its read, merge and write under one lock, and the new
/// document replaces the old one through a rename so readers never observe a
/// partially written file.
pub struct CatalogStore<R: Runtime> {
    runtime: R,
    path: PathBuf,
    lock: Mutex<()>,
}

impl<R: Runtime> CatalogStore<R> {
    pub fn new(runtime: R, path: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Prepends `entries` to the catalog on disk.
    #[tracing::instrument(skip(self, entries), fields(path = ?self.path, count = entries.len()))]
    pub async fn prepend(&self, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        let _guard = self.lock.lock().await;

        let existing = self
            .runtime
            .read_to_string(&self.path)
            .map_err(CatalogError::Read)?;
        let updated = merge(&existing, entries)?;
        self.persist(&updated)?;

        info!("Added {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn persist(&self, contents: &[u8]) -> Result<(), CatalogError> {
        let staged = staging_path(&self.path);
        debug!("Staging catalog at {:?}", staged);

        let result = self
            .runtime
            .write(&staged, contents)
            .and_then(|_| self.runtime.rename(&staged, &self.path));

        if let Err(e) = result {
            if self.runtime.exists(&staged)
                && let Err(cleanup) = self.runtime.remove_file(&staged)
            {
                warn!("Failed to remove staged catalog {:?}: {}", staged, cleanup);
            }
            return Err(CatalogError::Write(e));
        }

        Ok(())
    }
}

/// Sibling path used to stage a new document before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("catalog"));
    name.push(".tmp");
    path.with_file_name(name)
}
