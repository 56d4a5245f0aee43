use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CatalogError;

/// An AltStore source document.
///
/// Existing `apps` entries are kept as raw JSON so fields this service never
/// writes survive a merge untouched. Unknown top-level keys are preserved the
/// same way.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub apps: Vec<Value>,
    #[serde(rename = "userInfo", default = "empty_object")]
    pub user_info: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// One application release in the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub bundle_identifier: String,
    pub developer_name: String,
    pub subtitle: String,
    pub version: String,
    pub version_date: String,
    pub version_description: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub localized_description: String,
    #[serde(rename = "iconURL")]
    pub icon_url: String,
    pub tint_color: String,
    pub size: u64,
    pub beta: bool,
}

impl CatalogDocument {
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Inserts `entries` ahead of the existing apps, keeping both orders.
    pub fn prepend(&mut self, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        let mut apps = entries
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Encode(e.to_string()))?;
        apps.append(&mut self.apps);
        self.apps = apps;
        Ok(())
    }

    /// Encodes the document with tab indentation.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, CatalogError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| CatalogError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}

/// Parses `existing`, prepends `entries`, and returns the encoded document.
pub fn merge(existing: &str, entries: &[CatalogEntry]) -> Result<Vec<u8>, CatalogError> {
    let mut document = CatalogDocument::parse(existing)?;
    document.prepend(entries)?;
    document.to_pretty_json()
}
