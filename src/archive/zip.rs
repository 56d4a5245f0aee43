use log::debug;
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

use super::ArchiveError;

/// Largest entry `read_entry` will inflate. Bundle metadata is a few KiB.
pub const MAX_ENTRY_SIZE: u64 = 4 * 1024 * 1024;

/// A zip archive held entirely in memory.
pub struct ZipPackage<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ZipPackage<'a> {
    /// Opens `bytes` as a zip archive without touching the disk.
    pub fn open(bytes: &'a [u8]) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ArchiveError::Format(e.to_string()))?;
        debug!("Opened ZIP archive with {} entries", archive.len());
        Ok(Self { archive })
    }

    /// Reads the entry whose stored path equals `path` exactly.
    ///
    /// Entries larger than [`MAX_ENTRY_SIZE`], by header or by content, are
    /// rejected as [`ArchiveError::Read`].
    pub fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut entry = match self.archive.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::MissingEntry(path.to_string()));
            }
            Err(e) => return Err(ArchiveError::Read(e.to_string())),
        };

        if entry.is_dir() {
            return Err(ArchiveError::MissingEntry(path.to_string()));
        }

        if entry.size() > MAX_ENTRY_SIZE {
            return Err(ArchiveError::Read(format!(
                "{} declares {} bytes, limit is {}",
                path,
                entry.size(),
                MAX_ENTRY_SIZE
            )));
        }

        let mut buffer = Vec::new();
        (&mut entry)
            .take(MAX_ENTRY_SIZE + 1)
            .read_to_end(&mut buffer)
            .map_err(|e| ArchiveError::Read(e.to_string()))?;
        if buffer.len() as u64 > MAX_ENTRY_SIZE {
            return Err(ArchiveError::Read(format!(
                "{} is larger than {} bytes",
                path, MAX_ENTRY_SIZE
            )));
        }

        debug!("Read {} bytes from {}", buffer.len(), path);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn create_test_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_entry_exact_path() {
        let bytes = create_test_archive(&[
            ("Payload/Discord.app/Info.plist", b"plist"),
            ("Payload/Discord.app/Frameworks/Info.plist", b"nested"),
        ]);

        let mut package = ZipPackage::open(&bytes).unwrap();
        assert_eq!(
            package.read_entry("Payload/Discord.app/Info.plist").unwrap(),
            b"plist"
        );
    }

    #[test]
    fn test_read_entry_missing() {
        let bytes = create_test_archive(&[("Payload/Other.app/Info.plist", b"plist")]);

        let mut package = ZipPackage::open(&bytes).unwrap();
        let err = package
            .read_entry("Payload/Discord.app/Info.plist")
            .unwrap_err();

        assert!(matches!(err, ArchiveError::MissingEntry(_)));
        assert_eq!(
            err.to_string(),
            "Payload/Discord.app/Info.plist missing from archive"
        );
    }

    #[test]
    fn test_read_entry_is_case_sensitive() {
        let bytes = create_test_archive(&[("payload/discord.app/info.plist", b"plist")]);

        let mut package = ZipPackage::open(&bytes).unwrap();
        let result = package.read_entry("Payload/Discord.app/Info.plist");
        assert!(matches!(result, Err(ArchiveError::MissingEntry(_))));
    }

    #[test]
    fn test_read_entry_directory_is_missing() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Stored);
        zip.add_directory("Payload/Discord.app/Info.plist/", options)
            .unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let mut package = ZipPackage::open(&bytes).unwrap();
        let result = package.read_entry("Payload/Discord.app/Info.plist");
        assert!(matches!(result, Err(ArchiveError::MissingEntry(_))));
    }

    #[test]
    fn test_open_empty_archive() {
        let bytes = create_test_archive(&[]);
        let mut package = ZipPackage::open(&bytes).unwrap();
        assert!(matches!(
            package.read_entry("Payload/Discord.app/Info.plist"),
            Err(ArchiveError::MissingEntry(_))
        ));
    }

    fn le16(bytes: &[u8], at: usize) -> usize {
        u16::from_le_bytes([bytes[at], bytes[at + 1]]) as usize
    }

    /// Rewrites the uncompressed size recorded for the first entry in the
    /// central directory, through the zip64 extra field when one is used.
    fn declare_uncompressed_size(bytes: &mut [u8], size: u64) {
        let header = bytes
            .windows(4)
            .position(|w| w == b"PK\x01\x02")
            .expect("central directory header");
        let name_len = le16(bytes, header + 28);
        let extra_len = le16(bytes, header + 30);
        let size_at = header + 24;

        if bytes[size_at..size_at + 4] == [0xff; 4] {
            let mut at = header + 46 + name_len;
            let end = at + extra_len;
            while at + 4 <= end {
                let (id, len) = (le16(bytes, at), le16(bytes, at + 2));
                if id == 0x0001 {
                    bytes[at + 4..at + 12].copy_from_slice(&size.to_le_bytes());
                    return;
                }
                at += 4 + len;
            }
            panic!("zip64 extra field not found");
        }

        let narrow = size.min(0xffff_fffe) as u32;
        bytes[size_at..size_at + 4].copy_from_slice(&narrow.to_le_bytes());
    }

    #[test]
    fn test_read_entry_rejects_huge_declared_size() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<()> = FileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(true);
        zip.start_file("Payload/Discord.app/Info.plist", options)
            .unwrap();
        zip.write_all(b"plist").unwrap();
        let mut bytes = zip.finish().unwrap().into_inner();
        declare_uncompressed_size(&mut bytes, 1 << 60);

        let result = ZipPackage::open(&bytes)
            .and_then(|mut package| package.read_entry("Payload/Discord.app/Info.plist"));
        assert!(
            matches!(result, Err(ArchiveError::Read(_)) | Err(ArchiveError::Format(_))),
            "expected a read error, got {:?}",
            result.map(|b| b.len())
        );
    }

    #[test]
    fn test_read_entry_rejects_oversized_content() {
        let content = vec![0u8; MAX_ENTRY_SIZE as usize + 1];
        let bytes = create_test_archive(&[("Payload/Discord.app/Info.plist", &content)]);

        let mut package = ZipPackage::open(&bytes).unwrap();
        let result = package.read_entry("Payload/Discord.app/Info.plist");
        assert!(matches!(result, Err(ArchiveError::Read(_))));
    }

    #[test]
    fn test_read_entry_at_size_limit() {
        let content = vec![b'a'; MAX_ENTRY_SIZE as usize];
        let bytes = create_test_archive(&[("Payload/Discord.app/Info.plist", &content)]);

        let mut package = ZipPackage::open(&bytes).unwrap();
        let read = package.read_entry("Payload/Discord.app/Info.plist").unwrap();
        assert_eq!(read.len() as u64, MAX_ENTRY_SIZE);
    }

    #[test]
    fn test_open_corrupted_archive() {
        let result = ZipPackage::open(b"corrupted data");
        assert!(matches!(result, Err(ArchiveError::Format(_))));
    }
}
