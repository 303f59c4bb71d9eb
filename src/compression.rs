//! Brotli helpers shared by scene dumps and world files
//!
//! Plain text is detected by its first non-whitespace byte, so both
//! compressed and uncompressed files can be read through the same path.

use std::io::{self, Cursor};

/// Brotli quality used for every compressed file
pub const QUALITY: i32 = 6;
/// Brotli window size (log2)
pub const LGWIN: i32 = 22;

/// Check whether a buffer starts like an unnamed RON struct or a JSON object
///
/// Neither `(` nor `{` can open a brotli stream written with `LGWIN`, and
/// whitespace is accepted in front of either.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    matches!(
        bytes.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'(' | b'{')
    )
}

/// Check whether a buffer starts with a capitalized RON struct name and `(`
fn starts_with_struct_name(bytes: &[u8]) -> bool {
    let start = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    let bytes = &bytes[start..];
    let ident_len = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    bytes.first().is_some_and(u8::is_ascii_uppercase) && bytes.get(ident_len) == Some(&b'(')
}

/// Compress a buffer with brotli
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(data), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: QUALITY,
        lgwin: LGWIN,
        ..Default::default()
    })
    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("brotli compression failed: {}", e)))?;
    Ok(compressed)
}

/// Decompress a brotli buffer
pub fn decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    brotli::BrotliDecompress(&mut Cursor::new(data), &mut decompressed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("brotli decompression failed: {}", e)))?;
    Ok(decompressed)
}

/// Decode a text document, decompressing it first when it is not plain text
///
/// Named RON documents (`WorldAsset(..`) are only taken as plain text once
/// brotli has failed on them, so compressed data that happens to start with
/// letters is still decompressed.
pub fn decode_text(bytes: &[u8]) -> io::Result<String> {
    let raw = if looks_like_text(bytes) {
        bytes.to_vec()
    } else {
        match decompress(bytes) {
            Ok(raw) if !raw.is_empty() => raw,
            _ if starts_with_struct_name(bytes) => bytes.to_vec(),
            result => result?,
        }
    };
    String::from_utf8(raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("invalid UTF-8: {}", e)))
}
