//! Base64 encoding (standard alphabet, `=` padding)
//!
//! The `Content-MD5` header field carries the payload digest base64-encoded,
//! not hex-encoded; this is the only encoding the format needs.

use alloc::string::String;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode bytes as standard base64 with `=` padding
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for group in bytes.chunks(3) {
        let chunk = (u32::from(group[0]) << 16)
            | (u32::from(*group.get(1).unwrap_or(&0)) << 8)
            | u32::from(*group.get(2).unwrap_or(&0));

        out.push(ALPHABET[(chunk >> 18) as usize & 0x3F] as char);
        out.push(ALPHABET[(chunk >> 12) as usize & 0x3F] as char);
        out.push(if group.len() > 1 { ALPHABET[(chunk >> 6) as usize & 0x3F] as char } else { '=' });
        out.push(if group.len() > 2 { ALPHABET[chunk as usize & 0x3F] as char } else { '=' });
    }

    out
}
