//! Binary section metadata: parsing and rendering the CRLF field block
//!
//! The fields between the section markers describe the payload that follows
//! the magic bytes. Parsing only needs the three mandatory numeric fields
//! plus the optional checksum; rendering reproduces the full block
//! byte-for-byte, since consumers of the format expect this exact text.

use alloc::format;
use alloc::string::String;

use crate::error::{Error, Result};
use crate::{base64, md5};

/// Field tag for the compressed payload size in bytes
pub const SIZE_TAG: &str = "X-Binary-Size";
/// Field tag for the image width
pub const WIDTH_TAG: &str = "X-Binary-Size-Fastest-Dimension";
/// Field tag for the image height
pub const HEIGHT_TAG: &str = "X-Binary-Size-Second-Dimension";
/// Field tag for the base64 payload digest
pub const MD5_TAG: &str = "Content-MD5";

/// Metadata parsed from (or rendered into) the binary section header text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHeader {
    /// Image width (fastest dimension)
    pub width: u32,
    /// Image height (second dimension)
    pub height: u32,
    /// Size of the compressed payload in bytes
    pub compressed_size: usize,
    /// Base64 payload digest, when the file declares one.
    ///
    /// Kept for callers that want to validate the payload; `read` itself
    /// never checks it, since other compliant writers may differ in padding
    /// conventions without affecting data integrity.
    pub md5: Option<String>,
}

/// Check a declared `Content-MD5` value against the payload it describes.
///
/// Validation is opt-in: [`crate::read`] never calls this, since other
/// compliant writers may differ in conventions that do not affect data
/// integrity. Callers holding the payload slice and the value from
/// [`BinaryHeader::md5`] can ask explicitly.
#[inline]
pub fn verify_checksum(payload: &[u8], declared: &str) -> bool {
    base64::encode(&md5::digest(payload)) == declared
}

/// Find `tag` followed by a colon, at any occurrence.
///
/// Returns the offset just past the colon. The occurrence check matters:
/// `X-Binary-Size` is a prefix of both dimension tags, so a bare substring
/// search could land on the wrong field.
fn find_field(text: &[u8], tag: &str) -> Option<usize> {
    let needle = tag.as_bytes();
    let mut from = 0;
    while from + needle.len() < text.len() {
        let pos = text[from..]
            .windows(needle.len())
            .position(|window| window == needle)?
            + from;
        let after = pos + needle.len();
        if text.get(after) == Some(&b':') {
            return Some(after + 1);
        }
        from = pos + 1;
    }
    None
}

/// Parse the decimal value of `tag`, tolerating whitespace after the colon
fn parse_numeric_field(text: &[u8], tag: &'static str) -> Result<u64> {
    let mut pos = find_field(text, tag).ok_or(Error::MissingField(tag))?;

    while pos < text.len() && (text[pos] == b' ' || text[pos] == b'\t') {
        pos += 1;
    }

    let mut value: u64 = 0;
    let mut digits = 0;
    while pos < text.len() && text[pos].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(text[pos] - b'0'));
        pos += 1;
        digits += 1;
    }

    if digits == 0 {
        return Err(Error::MissingField(tag));
    }
    Ok(value)
}

/// Parse `tag` as a `u32`; values beyond the type are rejected, not
/// truncated, so an absurd header cannot masquerade as a small valid one
fn parse_u32_field(text: &[u8], tag: &'static str) -> Result<u32> {
    let value = parse_numeric_field(text, tag)?;
    u32::try_from(value).map_err(|_| Error::MissingField(tag))
}

/// Parse the value of the optional checksum field: the rest of its line
fn parse_md5_field(text: &[u8]) -> Option<String> {
    let start = find_field(text, MD5_TAG)?;
    let line = &text[start..];
    let end = line
        .iter()
        .position(|&byte| byte == b'\r' || byte == b'\n')
        .unwrap_or(line.len());
    let value = core::str::from_utf8(&line[..end]).ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(String::from(value))
    }
}

impl BinaryHeader {
    /// Parse the binary section header text.
    ///
    /// Width, height, and compressed size are mandatory; absence of any one
    /// is an error naming the missing tag. The checksum field is optional.
    pub fn parse(text: &[u8]) -> Result<Self> {
        let width = parse_u32_field(text, WIDTH_TAG)?;
        let height = parse_u32_field(text, HEIGHT_TAG)?;
        let compressed_size = usize::try_from(parse_numeric_field(text, SIZE_TAG)?)
            .map_err(|_| Error::MissingField(SIZE_TAG))?;
        let md5 = parse_md5_field(text);

        Ok(Self { width, height, compressed_size, md5 })
    }

    /// Render the `_array_data.data` section text for writing.
    ///
    /// Field order, tag spelling, CRLF terminators, and the trailing blank
    /// line are all part of the format contract.
    pub fn render(&self) -> String {
        let md5 = self.md5.as_deref().unwrap_or("");
        format!(
            "_array_data.data\r\n\
             ;\r\n\
             --CIF-BINARY-FORMAT-SECTION--\r\n\
             Content-Type: application/octet-stream;\r\n\
             \x20    conversions=\"x-CBF_BYTE_OFFSET\"\r\n\
             Content-Transfer-Encoding: BINARY\r\n\
             X-Binary-Size: {size}\r\n\
             X-Binary-ID: 1\r\n\
             X-Binary-Element-Type: \"signed 32-bit integer\"\r\n\
             X-Binary-Element-Byte-Order: LITTLE_ENDIAN\r\n\
             Content-MD5: {md5}\r\n\
             X-Binary-Number-of-Elements: {elements}\r\n\
             X-Binary-Size-Fastest-Dimension: {width}\r\n\
             X-Binary-Size-Second-Dimension: {height}\r\n\
             X-Binary-Size-Padding: {padding}\r\n\r\n",
            size = self.compressed_size,
            md5 = md5,
            elements = u64::from(self.width) * u64::from(self.height),
            width = self.width,
            height = self.height,
            padding = crate::PADDING_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const SAMPLE: &[u8] = b"--CIF-BINARY-FORMAT-SECTION--\r\n\
        Content-Type: application/octet-stream;\r\n\
        \x20    conversions=\"x-CBF_BYTE_OFFSET\"\r\n\
        Content-Transfer-Encoding: BINARY\r\n\
        X-Binary-Size: 37\r\n\
        X-Binary-ID: 1\r\n\
        X-Binary-Element-Type: \"signed 32-bit integer\"\r\n\
        X-Binary-Element-Byte-Order: LITTLE_ENDIAN\r\n\
        Content-MD5: 1B2M2Y8AsgTpgAmY7PhCfg==\r\n\
        X-Binary-Number-of-Elements: 12\r\n\
        X-Binary-Size-Fastest-Dimension: 4\r\n\
        X-Binary-Size-Second-Dimension: 3\r\n\
        X-Binary-Size-Padding: 4095\r\n\r\n";

    #[test]
    fn test_parse_sample() {
        let header = BinaryHeader::parse(SAMPLE).unwrap();
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 3);
        assert_eq!(header.compressed_size, 37);
        assert_eq!(header.md5.as_deref(), Some("1B2M2Y8AsgTpgAmY7PhCfg=="));
    }

    #[test]
    fn test_size_tag_not_confused_with_dimension_tags() {
        // Dimension fields appear before the size field here; the size
        // lookup must skip past them.
        let text = b"X-Binary-Size-Fastest-Dimension: 10\r\n\
            X-Binary-Size-Second-Dimension: 20\r\n\
            X-Binary-Size: 99\r\n";
        let header = BinaryHeader::parse(text).unwrap();
        assert_eq!(header.width, 10);
        assert_eq!(header.height, 20);
        assert_eq!(header.compressed_size, 99);
    }

    #[test]
    fn test_whitespace_after_colon() {
        let text = b"X-Binary-Size-Fastest-Dimension:42\r\n\
            X-Binary-Size-Second-Dimension: \t 7\r\n\
            X-Binary-Size:     5\r\n";
        let header = BinaryHeader::parse(text).unwrap();
        assert_eq!(header.width, 42);
        assert_eq!(header.height, 7);
        assert_eq!(header.compressed_size, 5);
    }

    #[test]
    fn test_missing_size_field() {
        let text = b"X-Binary-Size-Fastest-Dimension: 4\r\n\
            X-Binary-Size-Second-Dimension: 3\r\n";
        assert_eq!(
            BinaryHeader::parse(text),
            Err(Error::MissingField(SIZE_TAG))
        );
    }

    #[test]
    fn test_missing_width_field() {
        let text = b"X-Binary-Size: 5\r\nX-Binary-Size-Second-Dimension: 3\r\n";
        assert_eq!(
            BinaryHeader::parse(text),
            Err(Error::MissingField(WIDTH_TAG))
        );
    }

    #[test]
    fn test_non_numeric_field_value() {
        let text = b"X-Binary-Size-Fastest-Dimension: abc\r\n";
        assert_eq!(
            BinaryHeader::parse(text),
            Err(Error::MissingField(WIDTH_TAG))
        );
    }

    #[test]
    fn test_md5_optional() {
        let text = b"X-Binary-Size-Fastest-Dimension: 4\r\n\
            X-Binary-Size-Second-Dimension: 3\r\n\
            X-Binary-Size: 37\r\n";
        let header = BinaryHeader::parse(text).unwrap();
        assert_eq!(header.md5, None);
    }

    #[test]
    fn test_dimension_beyond_u32_rejected() {
        // 4294967297 is u32::MAX + 2; truncating it would yield width 1
        let text = b"X-Binary-Size-Fastest-Dimension: 4294967297\r\n\
            X-Binary-Size-Second-Dimension: 3\r\n\
            X-Binary-Size: 5\r\n";
        assert_eq!(
            BinaryHeader::parse(text),
            Err(Error::MissingField(WIDTH_TAG))
        );
    }

    #[test]
    fn test_height_beyond_u32_rejected() {
        let text = b"X-Binary-Size-Fastest-Dimension: 4\r\n\
            X-Binary-Size-Second-Dimension: 99999999999999999999\r\n\
            X-Binary-Size: 5\r\n";
        assert_eq!(
            BinaryHeader::parse(text),
            Err(Error::MissingField(HEIGHT_TAG))
        );
    }

    #[test]
    fn test_verify_checksum() {
        let payload = b"hello binary section";
        let declared = base64::encode(&md5::digest(payload));
        assert!(verify_checksum(payload, &declared));
        assert!(!verify_checksum(payload, "1B2M2Y8AsgTpgAmY7PhCfg=="));
        assert!(!verify_checksum(b"tampered payload bytes", &declared));
    }

    #[test]
    fn test_verify_checksum_against_parsed_header() {
        // SAMPLE declares the digest of the empty payload
        let header = BinaryHeader::parse(SAMPLE).unwrap();
        let declared = header.md5.unwrap();
        assert!(verify_checksum(b"", &declared));
        assert!(!verify_checksum(&[1, 2, 3, 4], &declared));
    }

    #[test]
    fn test_render_roundtrip() {
        let header = BinaryHeader {
            width: 2,
            height: 2,
            compressed_size: 4,
            md5: Some("1B2M2Y8AsgTpgAmY7PhCfg==".to_string()),
        };
        let text = header.render();
        assert!(text.starts_with("_array_data.data\r\n;\r\n--CIF-BINARY-FORMAT-SECTION--\r\n"));
        assert!(text.contains("Content-Type: application/octet-stream;\r\n"));
        assert!(text.contains("     conversions=\"x-CBF_BYTE_OFFSET\"\r\n"));
        assert!(text.contains("X-Binary-Number-of-Elements: 4\r\n"));
        assert!(text.contains("X-Binary-Size-Padding: 4095\r\n"));
        assert!(text.ends_with("\r\n\r\n"));

        assert_eq!(BinaryHeader::parse(text.as_bytes()).unwrap(), header);
    }
}
