use crate::config::AppProfile;
use crate::github::{Release, ReleaseAsset};

use super::CatalogEntry;

/// The `YYYY-MM-DD` prefix of a release timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionDate(String);

impl VersionDate {
    const LEN: usize = 10;

    /// Takes the first ten characters of an ISO-8601 timestamp.
    /// Returns `None` when the timestamp is shorter than that.
    pub fn from_timestamp(timestamp: &str) -> Option<Self> {
        timestamp
            .get(..Self::LEN)
            .map(|date| VersionDate(date.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Builds the catalog entry for one release asset.
pub fn build_entry(
    app: &AppProfile,
    asset: &ReleaseAsset,
    release: &Release,
    date: &VersionDate,
    version: &str,
) -> CatalogEntry {
    CatalogEntry {
        name: app.name.clone(),
        bundle_identifier: app.bundle_identifier.clone(),
        developer_name: app.developer_name.clone(),
        subtitle: app.subtitle.clone(),
        version: version.to_string(),
        version_date: date.as_str().to_string(),
        version_description: release.body.clone().unwrap_or_default(),
        download_url: asset.browser_download_url.clone(),
        localized_description: app.localized_description.clone(),
        icon_url: app.icon_url.clone(),
        tint_color: app.tint_color.clone(),
        size: asset.size,
        beta: false,
    }
}
