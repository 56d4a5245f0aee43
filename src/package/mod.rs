//! Package inspection module
//!
//! Downloads an application package, opens it as a zip archive in memory,
//! and reads the bundle version from its embedded Info.plist.

mod info;
mod inspector;

use async_trait::async_trait;

use crate::archive::ArchiveError;

pub use info::read_short_version;
pub use inspector::{PackageInspector, extract_version_from_bytes};

/// Errors raised while extracting a version from a package.
#[derive(Debug)]
pub enum InspectError {
    /// The package could not be downloaded.
    Network(anyhow::Error),
    /// The package is not a readable archive or lacks the metadata entry.
    Archive(ArchiveError),
    /// The metadata entry is not a property list of the expected shape.
    Decode(String),
    /// The metadata carries no short version string.
    MissingVersion,
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectError::Network(e) => write!(f, "Failed to fetch package: {:#}", e),
            InspectError::Archive(e) => write!(f, "{}", e),
            InspectError::Decode(msg) => write!(f, "Failed to decode Info.plist: {}", msg),
            InspectError::MissingVersion => {
                write!(f, "Info.plist has no CFBundleShortVersionString")
            }
        }
    }
}

impl std::error::Error for InspectError {}

impl From<ArchiveError> for InspectError {
    fn from(e: ArchiveError) -> Self {
        InspectError::Archive(e)
    }
}

/// Source of the version string embedded in a remote package.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn extract_version(&self, download_url: &str) -> Result<String, InspectError>;
}
