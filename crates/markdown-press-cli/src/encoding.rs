use std::str::FromStr;

use encoding_rs::Encoding;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unknown encoding: {0}")]
    Unsupported(String),
    #[error("'{encoding}' codec can't encode character {ch:?} in position {position}")]
    Unmappable {
        encoding: &'static str,
        ch: char,
        position: usize,
    },
}

/// Encodings accepted by `--output-encoding`.
///
/// UTF-16, strict ASCII and ISO-8859-1 are encoded here. Every other name is
/// looked up as a WHATWG label, which covers the legacy code pages
/// (`windows-1252`, `iso-8859-15`, `shift_jis`, `euc-kr`, `koi8-r`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Utf8,
    /// Little-endian with a byte order mark.
    Utf16,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
    Legacy(&'static Encoding),
}

impl FromStr for OutputEncoding {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        // The WHATWG table maps `ascii` and `latin1` onto windows-1252, so the
        // strict single-byte codecs are matched before the label lookup.
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(OutputEncoding::Utf8),
            "utf-16" | "utf16" => Ok(OutputEncoding::Utf16),
            "utf-16-le" | "utf-16le" | "utf16le" => Ok(OutputEncoding::Utf16Le),
            "utf-16-be" | "utf-16be" | "utf16be" => Ok(OutputEncoding::Utf16Be),
            "ascii" | "us-ascii" => Ok(OutputEncoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(OutputEncoding::Latin1),
            _ => Encoding::for_label_no_replacement(s.trim().as_bytes())
                .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
                // Decode-only labels encode as some other encoding.
                .filter(|&encoding| encoding.output_encoding() == encoding)
                .map(OutputEncoding::Legacy)
                .ok_or_else(|| EncodeError::Unsupported(s.to_string())),
        }
    }
}

impl OutputEncoding {
    pub fn name(self) -> &'static str {
        match self {
            OutputEncoding::Utf8 => "utf-8",
            OutputEncoding::Utf16 => "utf-16",
            OutputEncoding::Utf16Le => "utf-16-le",
            OutputEncoding::Utf16Be => "utf-16-be",
            OutputEncoding::Ascii => "ascii",
            OutputEncoding::Latin1 => "latin-1",
            OutputEncoding::Legacy(encoding) => encoding.name(),
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeError> {
        match self {
            OutputEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            OutputEncoding::Utf16 => {
                let mut out = vec![0xFF, 0xFE];
                out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                Ok(out)
            }
            OutputEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            OutputEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            OutputEncoding::Ascii => self.encode_single_byte(text, 0x7F),
            OutputEncoding::Latin1 => self.encode_single_byte(text, 0xFF),
            OutputEncoding::Legacy(encoding) => self.encode_legacy(encoding, text),
        }
    }

    fn encode_single_byte(self, text: &str, max: u32) -> Result<Vec<u8>, EncodeError> {
        text.chars()
            .enumerate()
            .map(|(position, ch)| {
                u8::try_from(ch as u32)
                    .ok()
                    .filter(|&b| u32::from(b) <= max)
                    .ok_or_else(|| EncodeError::Unmappable {
                        encoding: self.name(),
                        ch,
                        position,
                    })
            })
            .collect()
    }

    /// `encoding_rs` substitutes numeric character references for characters
    /// it cannot map; those are reported as errors instead.
    fn encode_legacy(self, encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, EncodeError> {
        let (bytes, _, had_unmappable) = encoding.encode(text);
        if !had_unmappable {
            return Ok(bytes.into_owned());
        }

        let mut buf = [0; 4];
        let (position, ch) = text
            .chars()
            .enumerate()
            .find(|&(_, ch)| encoding.encode(ch.encode_utf8(&mut buf)).2)
            .unwrap_or((0, '\u{FFFD}'));
        Err(EncodeError::Unmappable {
            encoding: self.name(),
            ch,
            position,
        })
    }
}
