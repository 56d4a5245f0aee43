//! Release asset lookup.

use crate::github::ReleaseAsset;

/// A release lacks an attachment the catalog needs.
#[derive(Debug, PartialEq)]
pub struct AssetNotFound(pub String);

impl std::fmt::Display for AssetNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} couldn't be found in release", self.0)
    }
}

impl std::error::Error for AssetNotFound {}

/// Returns the first asset whose name equals `name` exactly (case-sensitive).
pub fn find_asset<'a>(
    assets: &'a [ReleaseAsset],
    name: &str,
) -> Result<&'a ReleaseAsset, AssetNotFound> {
    assets
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| AssetNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, url: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            size: 1,
            browser_download_url: url.to_string(),
        }
    }

    #[test]
    fn test_find_asset_exact_match() {
        let assets = vec![
            asset("enmity.dev.ipa", "https://example.com/dev"),
            asset("enmity.ipa", "https://example.com/stable"),
        ];

        let found = find_asset(&assets, "enmity.ipa").unwrap();
        assert_eq!(found.browser_download_url, "https://example.com/stable");

        let found = find_asset(&assets, "enmity.dev.ipa").unwrap();
        assert_eq!(found.browser_download_url, "https://example.com/dev");
    }

    #[test]
    fn test_find_asset_returns_first_duplicate() {
        let assets = vec![
            asset("enmity.ipa", "https://example.com/first"),
            asset("enmity.ipa", "https://example.com/second"),
        ];

        let found = find_asset(&assets, "enmity.ipa").unwrap();
        assert_eq!(found.browser_download_url, "https://example.com/first");
    }

    #[test]
    fn test_find_asset_is_case_sensitive() {
        let assets = vec![asset("Enmity.ipa", "https://example.com/stable")];

        let result = find_asset(&assets, "enmity.ipa");
        assert_eq!(result, Err(AssetNotFound("enmity.ipa".to_string())));
    }

    #[test]
    fn test_find_asset_no_partial_match() {
        let assets = vec![asset("enmity.ipa.sha256", "https://example.com/sum")];
        assert!(find_asset(&assets, "enmity.ipa").is_err());
    }

    #[test]
    fn test_find_asset_empty_list() {
        let err = find_asset(&[], "enmity.ipa").unwrap_err();
        assert_eq!(err.to_string(), "enmity.ipa couldn't be found in release");
    }
}
