//! ZIP container access for XLSX workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Component, Path};
use zip::result::ZipError;

/// Decode XML part bytes into a string.
///
/// Workbook parts are UTF-8 in practice, but a UTF-8 BOM is stripped and a
/// UTF-16 BOM is honoured. Invalid byte sequences are rejected whether or
/// not a BOM is present.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    let content = char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    // The declaration still claims UTF-16 after decoding, which quick-xml would honour.
    Ok(content
        .replacen("encoding=\"UTF-16\"", "encoding=\"UTF-8\"", 1)
        .replacen("encoding=\"utf-16\"", "encoding=\"UTF-8\"", 1))
}

/// Read-only view over the parts of a workbook's ZIP container.
///
/// The container is opened once per ingestion run; every part is read on
/// demand by its path inside the archive.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sheetpulse::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("export.xlsx")?;
    /// assert!(container.exists("xl/workbook.xml"));
    /// # Ok::<(), sheetpulse::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        tracing::debug!(parts = archive.len(), "opened workbook container");
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read a named part as raw bytes.
    ///
    /// Fails with [`Error::PartNotFound`] when the archive has no such entry.
    pub fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => Error::PartNotFound(path.to_string()),
            other => Error::from(other),
        })?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        tracing::debug!(part = path, bytes = data.len(), "read container part");
        Ok(data)
    }

    /// Read a named XML part as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_part(path)?;
        decode_xml_bytes(&bytes).inspect_err(|e| {
            tracing::warn!(part = path, error = %e, "part is not valid text");
        })
    }

    /// Read an XML part that a workbook may legitimately omit.
    ///
    /// Returns `Ok(None)` only for a missing part; other failures propagate.
    pub fn read_optional_xml(&self, path: &str) -> Result<Option<String>> {
        match self.read_xml(path) {
            Ok(xml) => Ok(Some(xml)),
            Err(Error::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// List all part names in the archive.
    pub fn list_files(&self) -> Vec<String> {
        self.archive
            .borrow()
            .file_names()
            .map(String::from)
            .collect()
    }

    /// Resolve a relationship target against the part that declared it.
    ///
    /// Targets starting with `/` are rooted at the container root; all
    /// others are relative to the declaring part's directory.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut result = Path::new(base)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        for component in Path::new(relative).components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(c) => result.push(c),
                _ => {}
            }
        }

        path_to_part_name(&result)
    }
}

fn path_to_part_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}
