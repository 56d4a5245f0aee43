mod zip;

pub use zip::ZipPackage;

/// Errors raised while reading an in-memory archive.
#[derive(Debug)]
pub enum ArchiveError {
    /// The bytes are not a readable zip archive.
    Format(String),
    /// No entry exists at the requested path.
    MissingEntry(String),
    /// The entry exists but could not be decompressed.
    Read(String),
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::Format(msg) => write!(f, "Failed to parse ZIP archive: {}", msg),
            ArchiveError::MissingEntry(path) => write!(f, "{} missing from archive", path),
            ArchiveError::Read(msg) => write!(f, "Failed to read ZIP entry: {}", msg),
        }
    }
}

impl std::error::Error for ArchiveError {}
