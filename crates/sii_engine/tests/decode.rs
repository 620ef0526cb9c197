use pretty_assertions::assert_eq;
use sii_engine::{DecodeError, Decoder, FileType, SiiDecoder};

#[test]
fn siin_text_passes_through_unchanged() {
    assert_eq!(SiiDecoder.decode(b"SiiN").unwrap(), "SiiN");

    let text = "SiiNunit\n{\neconomy : _nameless.1 {\n money_account: 1500\n}\n}\n";
    assert_eq!(SiiDecoder.decode(text.as_bytes()).unwrap(), text);
}

#[test]
fn utf8_bom_is_dropped() {
    assert_eq!(SiiDecoder.decode(b"\xEF\xBB\xBFSiiNunit").unwrap(), "SiiNunit");
}

#[test]
fn unknown_header_is_rejected_with_message() {
    let err = SiiDecoder.decode(b"invalid").unwrap_err();
    assert_eq!(err, DecodeError::UnknownFileType);
    assert_eq!(err.to_string(), "Unknown file type");

    assert_eq!(SiiDecoder.decode(b"").unwrap_err(), DecodeError::UnknownFileType);
}

#[test]
fn binary_sii_is_reported_as_unsupported() {
    let err = SiiDecoder.decode(b"BSII\x02\x00\x00\x00").unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnsupportedFormat {
            format: FileType::Bsii
        }
    );
    assert_eq!(
        err.to_string(),
        "BSII files are not supported; only text (SiiN) saves can be decoded"
    );
}

#[test]
fn invalid_utf8_text_is_rejected() {
    let err = SiiDecoder.decode(b"SiiN\xff\xfe").unwrap_err();
    assert_eq!(err, DecodeError::InvalidText);
}

#[test]
fn truncated_container_is_rejected() {
    let err = SiiDecoder.decode(b"ScsC\x01\x02").unwrap_err();
    assert_eq!(err, DecodeError::Truncated);
}

#[test]
fn decoding_is_idempotent() {
    let input = b"SiiNunit\n{\n}\n";
    assert_eq!(SiiDecoder.decode(input), SiiDecoder.decode(input));
    assert_eq!(SiiDecoder.decode(b"junk"), SiiDecoder.decode(b"junk"));
}
