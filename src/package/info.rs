use serde::Deserialize;

use super::InspectError;

/// The single Info.plist key this service reads.
#[derive(Deserialize, Debug)]
struct BundleInfo {
    #[serde(rename = "CFBundleShortVersionString", default)]
    short_version: Option<String>,
}

/// Decodes an Info.plist (XML or binary) and returns its short version string.
///
/// A value of the wrong type is a decode failure; an absent key is
/// [`InspectError::MissingVersion`].
pub fn read_short_version(bytes: &[u8]) -> Result<String, InspectError> {
    let info: BundleInfo =
        plist::from_bytes(bytes).map_err(|e| InspectError::Decode(e.to_string()))?;
    info.short_version.ok_or(InspectError::MissingVersion)
}
