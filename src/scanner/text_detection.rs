//! Human-readable classification and decoding of candidate files

use content_inspector::ContentType;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Bytes sampled from the start of a file for classification
const SNIFF_LEN: usize = 1024;

/// Text encodings recognised by the sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

/// Outcome of sniffing a file's leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    Text(TextEncoding),
    Binary,
    /// Zero-length file, nothing to classify
    Empty,
    /// The file could not be opened or read
    Unknown,
}

impl ContentClass {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentClass::Text(_) => "text/plain",
            ContentClass::Binary => "application/octet-stream",
            ContentClass::Empty => "inode/x-empty",
            ContentClass::Unknown => "application/x-unknown",
        }
    }

    pub fn is_human_readable(&self) -> bool {
        self.mime_type().starts_with("text/")
    }
}

/// Classify a sample of bytes
pub fn sniff_bytes(sample: &[u8]) -> ContentClass {
    if sample.is_empty() {
        return ContentClass::Empty;
    }
    match content_inspector::inspect(sample) {
        ContentType::BINARY => ContentClass::Binary,
        ContentType::UTF_8 => ContentClass::Text(TextEncoding::Utf8),
        ContentType::UTF_8_BOM => ContentClass::Text(TextEncoding::Utf8Bom),
        ContentType::UTF_16LE => ContentClass::Text(TextEncoding::Utf16Le),
        ContentType::UTF_16BE => ContentClass::Text(TextEncoding::Utf16Be),
        ContentType::UTF_32LE => ContentClass::Text(TextEncoding::Utf32Le),
        ContentType::UTF_32BE => ContentClass::Text(TextEncoding::Utf32Be),
    }
}

/// Classify a file from its first [`SNIFF_LEN`] bytes
pub fn sniff(path: &Path) -> ContentClass {
    let Ok(file) = File::open(path) else {
        return ContentClass::Unknown;
    };
    let mut sample = Vec::with_capacity(SNIFF_LEN);
    match file.take(SNIFF_LEN as u64).read_to_end(&mut sample) {
        Ok(_) => sniff_bytes(&sample),
        Err(_) => ContentClass::Unknown,
    }
}

/// Read a whole text file, replacing sequences invalid in `encoding` with U+FFFD
pub fn read_text(path: &Path, encoding: TextEncoding) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes, encoding))
}

/// Decode bytes lossily. UTF-16 and UTF-32 byte-order marks are dropped.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        TextEncoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
        TextEncoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    strip_bom(text)
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let chunks = bytes.chunks_exact(4);
    let trailing = !chunks.remainder().is_empty();
    let mut text: String = chunks
        .map(|quad| {
            char::from_u32(unit([quad[0], quad[1], quad[2], quad[3]]))
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    strip_bom(text)
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[
        0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0x00, 0x00, 0x00, 0x0d, b'I', b'H',
        b'D', b'R',
    ];

    #[test]
    fn test_plain_text_is_human_readable() {
        let class = sniff_bytes(b"fn main() {}\n");
        assert_eq!(class, ContentClass::Text(TextEncoding::Utf8));
        assert_eq!(class.mime_type(), "text/plain");
        assert!(class.is_human_readable());
    }

    #[test]
    fn test_png_is_binary() {
        let class = sniff_bytes(PNG_HEADER);
        assert_eq!(class, ContentClass::Binary);
        assert!(!class.is_human_readable());
    }

    #[test]
    fn test_empty_and_missing_files_are_not_readable() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();

        assert_eq!(sniff(&empty), ContentClass::Empty);
        assert_eq!(sniff(&temp_dir.path().join("missing")), ContentClass::Unknown);
        assert!(!ContentClass::Empty.is_human_readable());
        assert!(!ContentClass::Unknown.is_human_readable());
    }

    #[test]
    fn test_invalid_utf8_is_substituted() {
        let text = decode(b"ok \xff\xfe done", TextEncoding::Utf8);
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" done"));
        assert!(text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn test_utf16_with_bom_is_decoded() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "hi".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(sniff_bytes(&bytes), ContentClass::Text(TextEncoding::Utf16Le));
        assert_eq!(decode(&bytes, TextEncoding::Utf16Le), "hi");
    }

    #[test]
    fn test_read_text_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();
        assert_eq!(read_text(&path, TextEncoding::Utf8).unwrap(), "hello");
    }
}
