use async_trait::async_trait;
use log::{debug, info};

use crate::archive::ZipPackage;
use crate::http::HttpClient;

use super::{InspectError, VersionSource, read_short_version};

/// Reads the version of a remote `.ipa` package.
pub struct PackageInspector {
    http: HttpClient,
    info_plist_path: String,
}

impl PackageInspector {
    /// `info_plist_path` is the archive path of the bundle metadata,
    /// e.g. `Payload/Discord.app/Info.plist`.
    pub fn new(http: HttpClient, info_plist_path: impl Into<String>) -> Self {
        Self {
            http,
            info_plist_path: info_plist_path.into(),
        }
    }
}

#[async_trait]
impl VersionSource for PackageInspector {
    #[tracing::instrument(skip(self))]
    async fn extract_version(&self, download_url: &str) -> Result<String, InspectError> {
        let final_url = self
            .http
            .resolve_final_url(download_url)
            .await
            .map_err(InspectError::Network)?;

        let bytes = self
            .http
            .fetch_bytes(&final_url)
            .await
            .map_err(InspectError::Network)?;

        let version = extract_version_from_bytes(&bytes, &self.info_plist_path)?;
        info!("Package {} has version {}", download_url, version);
        Ok(version)
    }
}

/// Opens `bytes` as a zip archive and reads the short version from the
/// Info.plist stored at `info_plist_path`.
pub fn extract_version_from_bytes(
    bytes: &[u8],
    info_plist_path: &str,
) -> Result<String, InspectError> {
    let mut package = ZipPackage::open(bytes)?;
    let plist = package.read_entry(info_plist_path)?;
    debug!("Found {} ({} bytes)", info_plist_path, plist.len());
    read_short_version(&plist)
}
