//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading and writing of OPC packages.
//! The reader owns the complete archive bytes, so no file handle outlives
//! [`PhysPkgReader::open`]; the writer assembles the archive in memory and
//! hands back the finished bytes.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::ooxml::error::{OoxmlError, Result};

/// Physical package reader that provides access to parts in a ZIP-based OPC package.
#[derive(Debug)]
pub struct PhysPkgReader {
    /// The underlying ZIP archive, backed by an owned buffer
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// The whole file is read into memory and the file handle is closed
    /// before this function returns.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or isn't a valid ZIP file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a new reader from owned bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Get the binary content of a member (e.g. `xl/workbook.xml`).
    pub fn blob_for(&mut self, membername: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(membername)
            .map_err(|_| OoxmlError::PartNotFound(membername.to_string()))?;

        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Get the binary content of a member, or `None` if the package lacks it.
    pub fn optional_blob_for(&mut self, membername: &str) -> Result<Option<Vec<u8>>> {
        if !self.contains(membername) {
            return Ok(None);
        }
        self.blob_for(membername).map(Some)
    }

    /// Check if a specific member exists in the package.
    #[inline]
    pub fn contains(&self, membername: &str) -> bool {
        self.archive.index_for_name(membername).is_some()
    }

    /// Get the number of members in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the package is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

/// Physical package writer for creating OPC packages.
///
/// Handles the low-level writing of parts to a ZIP archive with Deflate
/// compression.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part to the package with Deflate compression.
    ///
    /// # Arguments
    /// * `membername` - Member name without a leading slash
    /// * `blob` - The binary content to write
    pub fn write(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(membername, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        writer.write("test.txt", b"Hello, World!").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::from_bytes(zip_data).unwrap();
        assert_eq!(reader.blob_for("test.txt").unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_multiple_parts() {
        let mut writer = PhysPkgWriter::new();
        writer.write("[Content_Types].xml", b"<Types/>").unwrap();
        writer.write("_rels/.rels", b"<Relationships/>").unwrap();
        writer.write("xl/workbook.xml", b"<workbook/>").unwrap();

        let zip_data = writer.finish().unwrap();
        let mut reader = PhysPkgReader::from_bytes(zip_data).unwrap();

        assert_eq!(reader.len(), 3);
        assert!(reader.contains("_rels/.rels"));
        assert!(!reader.contains("xl/styles.xml"));
        assert_eq!(reader.optional_blob_for("xl/styles.xml").unwrap(), None);
        assert_eq!(reader.blob_for("xl/workbook.xml").unwrap(), b"<workbook/>");
    }

    #[test]
    fn test_missing_part() {
        let mut writer = PhysPkgWriter::new();
        writer.write("a.xml", b"<a/>").unwrap();
        let mut reader = PhysPkgReader::from_bytes(writer.finish().unwrap()).unwrap();

        assert!(matches!(
            reader.blob_for("b.xml"),
            Err(OoxmlError::PartNotFound(name)) if name == "b.xml"
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            PhysPkgReader::from_bytes(b"plain text, not a package".to_vec()),
            Err(OoxmlError::Zip(_))
        ));
    }
}
