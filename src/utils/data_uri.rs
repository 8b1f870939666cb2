//! Data URI encoding for logo images
//!
//! Logo files are read fully into memory and carried around as
//! `data:<mime>;base64,` URIs so history entries stay self-contained and
//! survive the original file being moved or deleted.

use crate::error::{QrStudioError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

/// Encode raw bytes as a data URI with the given MIME type
pub fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a data URI into its MIME type and raw bytes
pub fn decode(uri: &str) -> Result<(String, Vec<u8>)> {
    let invalid = |detail: &str| QrStudioError::InvalidDataUri(detail.to_string());

    let rest = uri.strip_prefix("data:").ok_or_else(|| invalid("missing data: prefix"))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| invalid("missing ;base64, separator"))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| invalid(&format!("bad base64 payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}

/// MIME type for a supported logo file extension (PNG/JPEG/SVG)
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_encode_decode_round_trip() {
        let bytes = [0u8, 1, 2, 250, 255];
        let uri = encode(&bytes, "image/png");
        assert!(uri.starts_with("data:image/png;base64,"));

        let (mime, decoded) = decode(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_decode_rejects_missing_prefix() {
        assert!(decode("image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_decode_rejects_non_base64_encoding() {
        assert!(decode("data:image/png;charset=utf8,AAAA").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_payload() {
        assert!(decode("data:image/png;base64,@@@@").is_err());
    }

    #[test]
    fn test_mime_for_supported_extensions() {
        assert_eq!(mime_for_path(&PathBuf::from("logo.png")), Some("image/png"));
        assert_eq!(mime_for_path(&PathBuf::from("logo.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(&PathBuf::from("logo.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(&PathBuf::from("logo.svg")), Some("image/svg+xml"));
    }

    #[test]
    fn test_mime_for_unsupported_extension() {
        assert_eq!(mime_for_path(&PathBuf::from("logo.gif")), None);
        assert_eq!(mime_for_path(&PathBuf::from("logo")), None);
    }
}
