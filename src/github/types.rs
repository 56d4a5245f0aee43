use serde::{Deserialize, Serialize};

/// Action tag of a release event that triggers a catalog update.
pub const PUBLISHED_ACTION: &str = "published";

/// Represents a GitHub `release` webhook notification
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
#[serde(default)]
pub struct ReleaseEvent {
    pub action: String,
    pub release: Release,
}

impl ReleaseEvent {
    pub fn is_published(&self) -> bool {
        self.action == PUBLISHED_ACTION
    }
}

/// Represents the release carried by a webhook notification
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
#[serde(default)]
pub struct Release {
    /// Release notes, free-form markdown. GitHub sends `null` when empty.
    pub body: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    pub assets: Vec<ReleaseAsset>,
}

/// Represents a GitHub release asset
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
#[serde(default)]
pub struct ReleaseAsset {
    pub name: String,
    pub size: u64,
    pub browser_download_url: String,
}
