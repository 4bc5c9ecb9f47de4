use encoding_rs::{SHIFT_JIS, UTF_8};

/// Which candidate decoding was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    ShiftJis,
    Utf8,
}

impl DetectedEncoding {
    pub fn label(self) -> &'static str {
        match self {
            DetectedEncoding::ShiftJis => "Shift_JIS",
            DetectedEncoding::Utf8 => "UTF-8",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    pub encoding: DetectedEncoding,
    pub shift_jis_replacements: usize,
    pub utf8_replacements: usize,
}

/// Decode `bytes` as both Shift_JIS and UTF-8 and keep whichever produced
/// fewer U+FFFD characters. Ties go to Shift_JIS.
pub fn decode_detailed(bytes: &[u8]) -> Decoded {
    let (sjis, _) = SHIFT_JIS.decode_without_bom_handling(bytes);
    let (utf8, _) = UTF_8.decode_with_bom_removal(bytes);

    let shift_jis_replacements = count_replacements(&sjis);
    let utf8_replacements = count_replacements(&utf8);

    let (text, encoding) = if shift_jis_replacements <= utf8_replacements {
        (sjis.into_owned(), DetectedEncoding::ShiftJis)
    } else {
        (utf8.into_owned(), DetectedEncoding::Utf8)
    };

    tracing::debug!(
        encoding = encoding.label(),
        shift_jis_replacements,
        utf8_replacements,
        "decoded statement bytes"
    );

    Decoded {
        text,
        encoding,
        shift_jis_replacements,
        utf8_replacements,
    }
}

/// Best-effort text; never fails.
pub fn decode(bytes: &[u8]) -> String {
    decode_detailed(bytes).text
}

fn count_replacements(text: &str) -> usize {
    text.chars()
        .filter(|&c| c == char::REPLACEMENT_CHARACTER)
        .count()
}
