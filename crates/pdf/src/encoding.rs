//! Text encodings

/// The byte used for characters that have no single-byte representation
pub const REPLACEMENT: u8 = b'?';

/// Escape a string so that it can be placed inside a PDF literal string
///
/// Only `\`, `(` and `)` are touched. Everything else, including line breaks
/// and non-ASCII characters, is passed through unchanged.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for chr in text.chars() {
        match chr {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(chr),
        }
    }
    out
}

fn latin1_char_encode(chr: char) -> Option<u8> {
    match u32::from(chr) {
        code @ 0x00..=0xFF => Some(code as u8),
        _ => None,
    }
}

/// Encode a string as ISO-8859-1, replacing unconvertible characters with `?`
pub fn latin1_encode_lossy(input: &str) -> Vec<u8> {
    input
        .chars()
        .map(|chr| latin1_char_encode(chr).unwrap_or(REPLACEMENT))
        .collect()
}
