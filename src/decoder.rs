//! Reading a frame out of a CBF byte stream
//!
//! The read path is: scan for the structural markers, slice the user header
//! text, parse the binary section metadata, locate the magic, take exactly
//! the declared number of payload bytes, and decompress them.

use alloc::string::String;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::header::BinaryHeader;
use crate::{byte_offset, scan, CBF_MAGIC};

/// Decode a full CBF byte stream into a [`Frame`].
///
/// The declared `Content-MD5` is not validated here; callers that want
/// validation can pass the payload slice and the value from
/// [`BinaryHeader::md5`] to [`crate::header::verify_checksum`].
pub fn read(bytes: &[u8]) -> Result<Frame> {
    let offsets = scan::scan(bytes)?;

    // A data_ line that only appears after the tag leaves no user header
    let header = if offsets.content_start < offsets.array_data {
        String::from_utf8_lossy(&bytes[offsets.content_start..offsets.array_data]).into_owned()
    } else {
        String::new()
    };

    let meta = BinaryHeader::parse(&bytes[offsets.binary_start..offsets.binary_end])?;

    let magic = scan::find_magic(bytes, offsets.binary_start)?;
    let payload_start = magic + CBF_MAGIC.len();
    let payload_end = payload_start
        .checked_add(meta.compressed_size)
        .ok_or(Error::TruncatedData)?;
    if payload_end > bytes.len() {
        return Err(Error::TruncatedData);
    }

    let payload = &bytes[payload_start..payload_end];
    let pixels = byte_offset::decompress(payload, meta.width as usize * meta.height as usize);

    Ok(Frame { header, pixels, width: meta.width, height: meta.height })
}
