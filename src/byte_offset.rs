//! CBF_BYTE_OFFSET delta compression
//!
//! Each pixel is stored as the signed difference from the previous pixel,
//! in the narrowest of three widths. Small deltas take a single byte; the
//! escape byte `0x80` widens to 16 bits, and the 16-bit sentinel `0x8000`
//! widens again to 32 bits. All multi-byte values are little-endian.

use alloc::vec::Vec;

/// Escape byte selecting a 16-bit (or wider) delta
const ESCAPE_8: u8 = 0x80;

/// 16-bit sentinel selecting a 32-bit delta
const ESCAPE_16: u16 = 0x8000;

/// Compress pixel values into a byte-offset delta stream.
///
/// The running accumulator starts at 0, so the first delta is the first
/// pixel value itself. Deltas of exactly -128 or 32768 fall outside the
/// single-width ranges and use the next wider encoding.
pub fn compress(pixels: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len());

    let mut current: i32 = 0;
    for &pixel in pixels {
        let delta = pixel.wrapping_sub(current);

        if (-127..=127).contains(&delta) {
            out.push(delta as u8);
        } else if (-32767..=32767).contains(&delta) {
            out.push(ESCAPE_8);
            out.extend_from_slice(&(delta as i16).to_le_bytes());
        } else {
            out.push(ESCAPE_8);
            out.extend_from_slice(&ESCAPE_16.to_le_bytes());
            out.extend_from_slice(&delta.to_le_bytes());
        }

        current = pixel;
    }

    out
}

/// Decompress a byte-offset delta stream into at most `max_elements` pixels.
///
/// Decoding is lenient: it stops at end of input or at `max_elements`
/// values, whichever comes first. A buffer ending mid-escape-sequence
/// halts decoding without error, so truncated input yields a prefix of
/// the pixel sequence rather than a failure.
pub fn decompress(compressed: &[u8], max_elements: usize) -> Vec<i32> {
    // Each input byte yields at most one pixel, so this bound also keeps a
    // lying header from reserving unbounded memory
    let mut pixels = Vec::with_capacity(max_elements.min(compressed.len()));

    let mut current: i32 = 0;
    let mut pos = 0;

    while pos < compressed.len() && pixels.len() < max_elements {
        let first = compressed[pos];
        pos += 1;

        let delta = if first != ESCAPE_8 {
            i32::from(first as i8)
        } else {
            if pos + 2 > compressed.len() {
                break;
            }
            let wide = u16::from_le_bytes([compressed[pos], compressed[pos + 1]]);
            pos += 2;

            if wide != ESCAPE_16 {
                i32::from(wide as i16)
            } else {
                if pos + 4 > compressed.len() {
                    break;
                }
                let bytes = [
                    compressed[pos],
                    compressed[pos + 1],
                    compressed[pos + 2],
                    compressed[pos + 3],
                ];
                pos += 4;
                i32::from_le_bytes(bytes)
            }
        };

        current = current.wrapping_add(delta);
        pixels.push(current);
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_small_deltas_one_byte_each() {
        // Deltas of 100 each stay within the 8-bit range
        let pixels = [100, 200, 300, 400];
        let compressed = compress(&pixels);
        assert_eq!(compressed, vec![100, 100, 100, 100]);
        assert_eq!(decompress(&compressed, 4), pixels);
    }

    #[test]
    fn test_negative_small_deltas() {
        let pixels = [0, -100, -200];
        let compressed = compress(&pixels);
        assert_eq!(compressed.len(), 3);
        assert_eq!(decompress(&compressed, 3), pixels);
    }

    #[test]
    fn test_threshold_8_bit_boundary() {
        // 127 and -127 fit in one byte; 128 and -128 need the 16-bit path
        assert_eq!(compress(&[127]).len(), 1);
        assert_eq!(compress(&[-127]).len(), 1);
        assert_eq!(compress(&[128]).len(), 3);
        assert_eq!(compress(&[-128]).len(), 3);
    }

    #[test]
    fn test_threshold_16_bit_boundary() {
        // 32767 and -32767 fit in the 16-bit path; 32768 and -32768 need 32 bits
        assert_eq!(compress(&[32767]).len(), 3);
        assert_eq!(compress(&[-32767]).len(), 3);
        assert_eq!(compress(&[32768]).len(), 7);
        assert_eq!(compress(&[-32768]).len(), 7);
    }

    #[test]
    fn test_wide_delta_layout() {
        // Second delta of 40000 exceeds the 16-bit range
        let compressed = compress(&[0, 40000]);
        assert_eq!(compressed[0], 0x00);
        assert_eq!(compressed[1], 0x80);
        assert_eq!(&compressed[2..4], &0x8000u16.to_le_bytes());
        assert_eq!(&compressed[4..8], &40000i32.to_le_bytes());
        assert_eq!(decompress(&compressed, 2), [0, 40000]);
    }

    #[test]
    fn test_extreme_values_roundtrip() {
        let pixels = [i32::MIN, i32::MAX, 0, i32::MAX, i32::MIN, -1, 1];
        let compressed = compress(&pixels);
        assert_eq!(decompress(&compressed, pixels.len()), pixels);
    }

    #[test]
    fn test_mixed_widths_roundtrip() {
        let pixels = [0, 1, 200, -30000, 30000, 100_000, -100_000, 5];
        let compressed = compress(&pixels);
        assert_eq!(decompress(&compressed, pixels.len()), pixels);
    }

    #[test]
    fn test_truncated_input_yields_prefix() {
        let pixels = [100, 200, 300, 400];
        let compressed = compress(&pixels);
        assert_eq!(decompress(&compressed[..2], 4), [100, 200]);
    }

    #[test]
    fn test_truncated_mid_escape_halts_without_error() {
        let compressed = compress(&[0, 40000]);
        // Cut inside the 32-bit delta bytes
        assert_eq!(decompress(&compressed[..5], 2), [0]);
        // Cut right after the escape byte
        assert_eq!(decompress(&compressed[..2], 2), [0]);
    }

    #[test]
    fn test_overlong_input_capped_at_max_elements() {
        let compressed = compress(&[1, 2, 3, 4, 5]);
        assert_eq!(decompress(&compressed, 3), [1, 2, 3]);
    }

    #[test]
    fn test_empty() {
        assert!(compress(&[]).is_empty());
        assert!(decompress(&[], 0).is_empty());
        assert!(decompress(&[], 10).is_empty());
    }
}
