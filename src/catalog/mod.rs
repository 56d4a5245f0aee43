//! AltStore catalog document: entry construction, merge, and persistence.

mod builder;
mod model;
mod store;

pub use builder::{VersionDate, build_entry};
pub use model::{CatalogDocument, CatalogEntry, merge};
pub use store::CatalogStore;

/// Errors raised while updating the catalog file.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Read(anyhow::Error),
    /// The catalog file exists but is not a valid document.
    Parse(String),
    /// The updated document could not be encoded.
    Encode(String),
    /// The updated document could not be persisted.
    Write(anyhow::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Read(e) => write!(f, "Couldn't read catalog file: {:#}", e),
            CatalogError::Parse(msg) => write!(f, "Couldn't parse catalog file: {}", msg),
            CatalogError::Encode(msg) => write!(f, "Couldn't encode catalog: {}", msg),
            CatalogError::Write(e) => write!(f, "Couldn't write catalog file: {:#}", e),
        }
    }
}

impl std::error::Error for CatalogError {}
