use std::fmt;

use encoding_rs::{Encoding, UTF_8};

use crate::scsc::ScscFile;

/// The Decode Engine: turns the raw bytes of an SII file into text.
///
/// Implementations must be pure; the dispatcher may call them on any thread.
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unknown file type")]
    UnknownFileType,
    #[error("{format} files are not supported; only text (SiiN) saves can be decoded")]
    UnsupportedFormat { format: FileType },
    #[error("SiiN text is not valid UTF-8")]
    InvalidText,
    #[error("ScsC header is truncated")]
    Truncated,
    #[error("ScsC payload could not be decrypted: {0}")]
    Decrypt(String),
    #[error("ScsC payload could not be decompressed: {0}")]
    Decompress(String),
    #[error("ScsC container is nested inside another ScsC container")]
    NestedContainer,
    /// Failure reported by a third-party engine, passed through verbatim.
    #[error("{0}")]
    Engine(String),
}

/// File types recognised by their 4-byte magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Encrypted and zlib-compressed container.
    Scsc,
    /// Binary SII layout.
    Bsii,
    /// Plain SII text.
    Siin,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Scsc => write!(f, "ScsC"),
            FileType::Bsii => write!(f, "BSII"),
            FileType::Siin => write!(f, "SiiN"),
        }
    }
}

/// Detects the file type from the header; `None` when unrecognised.
pub fn detect_file_type(content: &[u8]) -> Option<FileType> {
    match content.get(..4)? {
        b"ScsC" => Some(FileType::Scsc),
        b"BSII" => Some(FileType::Bsii),
        b"SiiN" => Some(FileType::Siin),
        _ => None,
    }
}

/// Reference engine: unwraps ScsC containers and passes SiiN text through.
///
/// BSII payloads are recognised but rejected with [`DecodeError::UnsupportedFormat`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SiiDecoder;

impl Decoder for SiiDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        decode_layer(bytes, false)
    }
}

fn decode_layer(bytes: &[u8], nested: bool) -> Result<String, DecodeError> {
    let body = strip_utf8_bom(bytes);
    match detect_file_type(body) {
        Some(FileType::Siin) => decode_text(body),
        Some(FileType::Scsc) if nested => Err(DecodeError::NestedContainer),
        Some(FileType::Scsc) => {
            let payload = ScscFile::parse(body)?.decrypt()?;
            decode_layer(&payload, true)
        }
        Some(format @ FileType::Bsii) => Err(DecodeError::UnsupportedFormat { format }),
        None => Err(DecodeError::UnknownFileType),
    }
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
        _ => bytes,
    }
}

fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(DecodeError::InvalidText)
}
