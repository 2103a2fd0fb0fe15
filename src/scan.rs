//! Container scanning: locating the structural markers of a CBF byte stream
//!
//! A CBF file is part text, part binary, so scanning works on raw bytes and
//! never assumes the input is valid UTF-8. The offsets found here are what
//! the decoder uses to slice header text from the compressed payload.

use crate::error::{markers, Error, Result};
use crate::{ARRAY_DATA_TAG, CBF_MAGIC, DATA_TAG, SECTION_END, SECTION_START};

/// Byte offsets of the structural elements of one CBF container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    /// Start of the user header content, after the `data_` line and any
    /// immediately following line-ending characters
    pub content_start: usize,
    /// Offset of the `_array_data.data` tag (end of the user header)
    pub array_data: usize,
    /// Offset of the binary section start marker
    pub binary_start: usize,
    /// Offset of the binary section end marker
    pub binary_end: usize,
}

/// Find `needle` in `haystack` starting at `from`
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < from {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Locate the structural markers of a CBF byte stream.
///
/// The end marker is searched from the start marker offset: the two differ
/// only in their trailing dashes, so an independent search could land on
/// the wrong one.
pub fn scan(bytes: &[u8]) -> Result<SectionOffsets> {
    let array_data = find(bytes, ARRAY_DATA_TAG, 0)
        .ok_or(Error::MissingMarker(markers::ARRAY_DATA_SECTION))?;

    let binary_start = find(bytes, SECTION_START, array_data)
        .ok_or(Error::MissingMarker(markers::SECTION_START))?;

    let binary_end = find(bytes, SECTION_END, binary_start)
        .ok_or(Error::MissingMarker(markers::SECTION_END))?;

    let data_tag = find(bytes, DATA_TAG, 0).ok_or(Error::MissingMarker(markers::DATA_SECTION))?;

    let data_line_end = find(bytes, b"\n", data_tag)
        .ok_or(Error::MissingMarker(markers::DATA_LINE_END))?;

    // Skip the blank line after the data_ identifier
    let mut content_start = data_line_end + 1;
    while content_start < bytes.len() && matches!(bytes[content_start], b'\r' | b'\n') {
        content_start += 1;
    }

    Ok(SectionOffsets { content_start, array_data, binary_start, binary_end })
}

/// Locate the 4-byte magic sequence, searching from `from`.
///
/// The search starts at the binary section start rather than the beginning
/// of the file so that text bytes cannot produce a false match.
pub fn find_magic(bytes: &[u8], from: usize) -> Result<usize> {
    find(bytes, &CBF_MAGIC, from).ok_or(Error::MissingMarker(markers::MAGIC))
}
