//! Packs rendered parts into the Office Open XML zip container.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::error::AssemblyError;

/// A rendered part ready to be written.
#[derive(Debug, Clone)]
pub struct PackagePart<'a> {
    pub name: &'a str,
    pub bytes: Cow<'a, [u8]>,
}

/// Entries get the DOS epoch as modification time and fixed permissions so
/// that identical parts always produce identical archives.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

/// Writes `parts` into a zip container, in the given order.
///
/// # Arguments
/// * `parts` - Rendered parts; `[Content_Types].xml` is expected first.
///
/// # Returns
/// - `Ok(Vec<u8>)` with the archive bytes.
/// - `Err(AssemblyError::SerializationFailure)` if the writer fails.
pub fn pack(parts: &[PackagePart]) -> Result<Vec<u8>, AssemblyError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for part in parts {
        writer.start_file(part.name, entry_options())?;
        writer.write_all(&part.bytes).map_err(ZipError::from)?;
    }
    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn parts() -> Vec<PackagePart<'static>> {
        vec![
            PackagePart {
                name: "[Content_Types].xml",
                bytes: Cow::Borrowed(b"<Types/>"),
            },
            PackagePart {
                name: "word/document.xml",
                bytes: Cow::Owned(b"<w:document/>".to_vec()),
            },
        ]
    }

    #[test]
    fn packed_archive_reopens_with_parts_in_order() {
        let bytes = pack(&parts()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "[Content_Types].xml");

        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert_eq!(document, "<w:document/>");
    }

    #[test]
    fn packing_is_deterministic() {
        assert_eq!(pack(&parts()).unwrap(), pack(&parts()).unwrap());
    }
}
