//! Fallback-encoding file reading.
//!
//! Input files are decoded with one fixed, caller-chosen encoding. There is no
//! detection: malformed sequences are either dropped or, in strict mode,
//! reported as a per-file error.

use crate::domain::DecodeErrors;
use crate::error::FileReadError;
use encoding_rs::{DecoderResult, Encoding, UTF_8};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The encoding assumed for every input file.
#[derive(Clone, Copy)]
pub struct FallbackEncoding(&'static Encoding);

impl FallbackEncoding {
    /// Look up an encoding by WHATWG label (`utf-8`, `gbk`, `shift_jis`, ...).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }
}

impl Default for FallbackEncoding {
    fn default() -> Self {
        Self(UTF_8)
    }
}

impl fmt::Debug for FallbackEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FallbackEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for FallbackEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FallbackEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_label(s).ok_or_else(|| format!("Unknown encoding label: '{}'", s))
    }
}

/// Read a whole file and decode it with `encoding`.
///
/// The handle is closed before this returns, on success and on error alike.
pub fn read_with_fallback(
    path: &Path,
    encoding: FallbackEncoding,
    errors: DecodeErrors,
) -> Result<String, FileReadError> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes, encoding, errors)
}

/// Decode `bytes` without BOM sniffing and without replacement characters.
pub fn decode_bytes(
    bytes: &[u8],
    encoding: FallbackEncoding,
    errors: DecodeErrors,
) -> Result<String, FileReadError> {
    let mut decoder = encoding.encoding().new_decoder_without_bom_handling();
    let mut out = String::with_capacity(
        decoder.max_utf8_buffer_length_without_replacement(bytes.len()).unwrap_or(bytes.len()),
    );
    let mut input = bytes;
    let mut consumed = 0usize;

    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut out, true);
        input = &input[read..];
        consumed += read;

        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(input.len())
                    .unwrap_or(input.len().saturating_mul(3));
                out.reserve(needed.max(16));
            }
            DecoderResult::Malformed(bad, after) => {
                if errors == DecodeErrors::Strict {
                    let offset = consumed.saturating_sub(bad as usize + after as usize);
                    return Err(FileReadError::Decode { encoding: encoding.name(), offset });
                }
                // Ignore: the malformed bytes are already consumed.
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_label_lookup() {
        assert_eq!(FallbackEncoding::for_label("utf8").unwrap().name(), "UTF-8");
        assert_eq!(FallbackEncoding::for_label(" GBK ").unwrap().name(), "GBK");
        assert!(FallbackEncoding::for_label("klingon").is_none());
        assert!("klingon".parse::<FallbackEncoding>().is_err());
    }

    #[test]
    fn test_read_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("Test content 🚀".as_bytes()).unwrap();
        file.flush().unwrap();

        let content =
            read_with_fallback(file.path(), FallbackEncoding::default(), DecodeErrors::Ignore)
                .unwrap();
        assert_eq!(content, "Test content 🚀");
    }

    #[test]
    fn test_gbk_decoding() {
        // "中文" in GBK
        let bytes = [0xd6, 0xd0, 0xce, 0xc4];
        let gbk = FallbackEncoding::for_label("gbk").unwrap();
        let content = decode_bytes(&bytes, gbk, DecodeErrors::Ignore).unwrap();
        assert_eq!(content, "中文");
    }

    #[test]
    fn test_malformed_bytes_are_dropped() {
        let bytes = b"ab\xffcd\xfe";
        let content = decode_bytes(bytes, FallbackEncoding::default(), DecodeErrors::Ignore).unwrap();
        assert_eq!(content, "abcd");
    }

    #[test]
    fn test_strict_reports_offset() {
        let bytes = b"ab\xffcd";
        let err = decode_bytes(bytes, FallbackEncoding::default(), DecodeErrors::Strict).unwrap_err();
        match err {
            FileReadError::Decode { encoding, offset } => {
                assert_eq!(encoding, "UTF-8");
                assert_eq!(offset, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bom_is_kept() {
        let bytes = b"\xef\xbb\xbfhi";
        let content = decode_bytes(bytes, FallbackEncoding::default(), DecodeErrors::Ignore).unwrap();
        assert_eq!(content, "\u{feff}hi");
    }

    #[test]
    fn test_large_input_grows_buffer() {
        let text = "é".repeat(50_000);
        let content =
            decode_bytes(text.as_bytes(), FallbackEncoding::default(), DecodeErrors::Strict)
                .unwrap();
        assert_eq!(content, text);
    }

    #[test]
    fn test_missing_file_is_access_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_with_fallback(
            &dir.path().join("gone.txt"),
            FallbackEncoding::default(),
            DecodeErrors::Ignore,
        )
        .unwrap_err();
        assert!(matches!(err, FileReadError::Access(_)));
    }
}
