//! Little-endian bit extraction and insertion over byte spans

use super::max_raw;

fn load(bytes: &[u8]) -> u128 {
    bytes
        .iter()
        .take(16)
        .enumerate()
        .fold(0u128, |acc, (i, &b)| acc | (b as u128) << (8 * i))
}

/// Reads `width` bits starting at bit `start_bit` of `bytes[0]`.
///
/// `bytes` must cover `start_bit + width` bits; missing high bytes read as 0.
pub fn extract_bits(bytes: &[u8], start_bit: u8, width: u8) -> u64 {
    let mask = max_raw(width) as u128;
    ((load(bytes) >> start_bit) & mask) as u64
}

/// Replaces `width` bits at `start_bit` with `value` (clamped to the width).
///
/// Every bit outside the field keeps its previous value.
pub fn insert_bits(bytes: &mut [u8], start_bit: u8, width: u8, value: u64) {
    let max = max_raw(width);
    let value = value.min(max) as u128;
    let mask = (max as u128) << start_bit;
    let merged = (load(bytes) & !mask) | (value << start_bit);
    for (i, b) in bytes.iter_mut().take(16).enumerate() {
        *b = (merged >> (8 * i)) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_within_byte() {
        // 0b1011_0100: bits 2..5 = 0b101
        assert_eq!(extract_bits(&[0b1011_0100], 2, 3), 0b101);
        assert_eq!(extract_bits(&[0xFF], 0, 8), 0xFF);
    }

    #[test]
    fn test_extract_across_bytes() {
        // value 0x1FF at bit 4 spans two bytes
        let bytes = [0xF0, 0x1F];
        assert_eq!(extract_bits(&bytes, 4, 9), 0x1FF);
    }

    #[test]
    fn test_extract_sixty_four_bits_at_offset() {
        let mut bytes = [0u8; 9];
        insert_bits(&mut bytes, 7, 64, u64::MAX);
        assert_eq!(bytes[0], 0x80);
        assert_eq!(bytes[8], 0x7F);
        assert_eq!(extract_bits(&bytes, 7, 64), u64::MAX);
    }

    #[test]
    fn test_insert_preserves_neighbours() {
        let mut bytes = [0xFF, 0xFF];
        insert_bits(&mut bytes, 3, 6, 0);
        assert_eq!(bytes, [0b0000_0111, 0b1111_1110]);
    }

    #[test]
    fn test_insert_clamps() {
        let mut bytes = [0u8; 1];
        insert_bits(&mut bytes, 0, 3, 99);
        assert_eq!(bytes[0], 0b111);
    }

    proptest! {
        #[test]
        fn prop_insert_then_extract(
            start_bit in 0u8..8,
            width in 1u8..=32,
            value in any::<u64>(),
            fill in any::<u64>(),
        ) {
            let len = (start_bit as usize + width as usize + 7) / 8;
            let original: Vec<u8> = fill.to_le_bytes().iter().cycle().take(len).copied().collect();
            let mut bytes = original.clone();
            insert_bits(&mut bytes, start_bit, width, value);
            prop_assert_eq!(extract_bits(&bytes, start_bit, width), value.min(max_raw(width)));

            // Bits outside the field are untouched
            let field_mask = (max_raw(width) as u128) << start_bit;
            prop_assert_eq!(load(&bytes) & !field_mask, load(&original) & !field_mask);
        }
    }
}
