//! ZIP package access for `.xlsx` workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A workbook package: the ZIP archive holding the SpreadsheetML parts.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a workbook package from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a package from the raw bytes of an `.xlsx` file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as text, decoding UTF-8 or UTF-16 content.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut part = archive
            .by_name(name)
            .map_err(|_| Error::MissingComponent(name.to_string()))?;

        let mut bytes = Vec::new();
        part.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Check whether a part exists in the package.
    pub fn contains(&self, name: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == name);
        found
    }
}

/// Decode XML bytes, honouring a UTF-8 or UTF-16 byte order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))),
        [0xFF, 0xFE, rest @ ..] => {
            let text = decode_utf16(rest, u16::from_le_bytes)?;
            Ok(declare_utf8(&text))
        }
        [0xFE, 0xFF, rest @ ..] => {
            let text = decode_utf16(rest, u16::from_be_bytes)?;
            Ok(declare_utf8(&text))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                decode_utf16(bytes, u16::from_le_bytes)
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                decode_utf16(bytes, u16::from_be_bytes)
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Rewrite a UTF-16 encoding declaration once the text is already UTF-8,
/// otherwise quick-xml tries to decode it a second time.
fn declare_utf8(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let Some(end) = content.find("?>") else {
        return content.to_string();
    };
    let (decl, rest) = content.split_at(end + 2);
    let decl = decl
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");
    format!("{}{}", decl, rest)
}
