//! Fixed-width UTF-16LE text fields

/// Decodes UTF-16LE bytes up to the first null code unit.
///
/// Unpaired surrogates are dropped and a trailing odd byte is ignored.
pub fn decode_wide(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0);
    char::decode_utf16(units).filter_map(Result::ok).collect()
}

/// Encodes `text` into exactly `max_chars * 2` bytes.
///
/// At most `max_chars - 1` code units are kept so the field always holds a
/// terminating null; the remainder is zero-filled. A surrogate pair cut in
/// half by the limit is dropped whole.
pub fn encode_wide_fixed(text: &str, max_chars: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; max_chars * 2];
    let keep = max_chars.saturating_sub(1);
    let mut units: Vec<u16> = text.encode_utf16().take(keep).collect();
    if units.last().is_some_and(|u| (0xD800..=0xDBFF).contains(u)) {
        units.pop();
    }
    for (i, unit) in units.into_iter().enumerate() {
        bytes[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stops_at_null() {
        let mut bytes = encode_wide_fixed("John", 20);
        bytes[10] = b'X';
        assert_eq!(decode_wide(&bytes), "John");
    }

    #[test]
    fn test_decode_without_terminator() {
        let bytes: Vec<u8> = "Hi".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(decode_wide(&bytes), "Hi");
    }

    #[test]
    fn test_decode_drops_invalid_units() {
        // Lone high surrogate between two letters
        let bytes = [b'A', 0, 0x00, 0xD8, b'B', 0, 0, 0];
        assert_eq!(decode_wide(&bytes), "AB");
    }

    #[test]
    fn test_encode_truncates_and_pads() {
        let bytes = encode_wide_fixed("ABCDEFG", 4);
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode_wide(&bytes), "ABC");
        assert_eq!(&bytes[6..], &[0, 0]);
    }

    #[test]
    fn test_encode_non_ascii() {
        let bytes = encode_wide_fixed("Dončić", 20);
        assert_eq!(decode_wide(&bytes), "Dončić");
        assert_eq!(bytes.len(), 40);
    }

    #[test]
    fn test_encode_never_splits_surrogate_pair() {
        // "AB" then U+1F3C0 as two code units; the limit falls between them
        let bytes = encode_wide_fixed("AB\u{1F3C0}", 4);
        assert_eq!(&bytes[4..], &[0, 0, 0, 0]);
        assert_eq!(decode_wide(&bytes), "AB");

        let whole = encode_wide_fixed("AB\u{1F3C0}", 5);
        assert_eq!(decode_wide(&whole), "AB\u{1F3C0}");
    }

    #[test]
    fn test_encode_zero_width() {
        assert!(encode_wide_fixed("abc", 0).is_empty());
    }
}
