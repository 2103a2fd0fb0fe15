//! Assembling a frame into a CBF byte stream
//!
//! The write path is single-pass: compress the pixels, digest the result,
//! then emit prefix, user header, metadata block, magic, payload, and the
//! fixed trailer in order.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::header::BinaryHeader;
use crate::{base64, byte_offset, md5, CBF_MAGIC, PADDING_SIZE, SECTION_END};

/// How the writer produces the text ahead of the binary payload.
///
/// The two modes correspond to the two historical writer behaviors; the
/// frame type is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Emit the version prefix, the stored user header (or a minimal
    /// default block), and a freshly generated metadata section
    #[default]
    Generated,
    /// Emit the stored header verbatim and nothing else before the magic.
    /// The header must already contain a complete metadata section for the
    /// output to be readable.
    Verbatim,
}

/// Encode a frame as a complete CBF byte stream.
///
/// `target_name` seeds the `data_<name>` identifier line; path components
/// are stripped, a `.cbf` suffix is dropped, and whitespace becomes
/// underscores. Fails with [`Error::InvalidFrame`] before producing any
/// output if the frame has no pixels, a zero dimension, or a pixel count
/// that does not match its dimensions.
pub fn write(frame: &Frame, target_name: &str) -> Result<Vec<u8>> {
    write_with(frame, target_name, HeaderMode::Generated)
}

/// Encode a frame with an explicit [`HeaderMode`]
pub fn write_with(frame: &Frame, target_name: &str, mode: HeaderMode) -> Result<Vec<u8>> {
    if frame.pixels.is_empty() || frame.width == 0 || frame.height == 0 {
        return Err(Error::InvalidFrame);
    }
    if frame.pixels.len() != frame.element_count() {
        return Err(Error::InvalidFrame);
    }

    let compressed = byte_offset::compress(&frame.pixels);
    let checksum = base64::encode(&md5::digest(&compressed));

    let mut out = Vec::with_capacity(compressed.len() + PADDING_SIZE + 512);

    match mode {
        HeaderMode::Generated => {
            out.extend_from_slice(prefix(target_name).as_bytes());
            if frame.header.is_empty() {
                out.extend_from_slice(default_header().as_bytes());
            } else {
                out.extend_from_slice(frame.header.as_bytes());
            }
            let meta = BinaryHeader {
                width: frame.width,
                height: frame.height,
                compressed_size: compressed.len(),
                md5: Some(checksum),
            };
            out.extend_from_slice(meta.render().as_bytes());
        }
        HeaderMode::Verbatim => {
            out.extend_from_slice(frame.header.as_bytes());
        }
    }

    out.extend_from_slice(&CBF_MAGIC);
    out.extend_from_slice(&compressed);

    // Fixed trailer: zero padding, then the closing marker text
    out.resize(out.len() + PADDING_SIZE, 0);
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(SECTION_END);
    out.extend_from_slice(b"\r\n;\r\n\r\n");

    Ok(out)
}

/// Version line plus the `data_<name>` identifier and its blank line
fn prefix(target_name: &str) -> String {
    let mut out = String::from("###CBF: VERSION 1.5 generated by nanocbf\r\n");
    out.push_str("data_");
    out.push_str(&base_name(target_name));
    out.push_str("\r\n\r\n");
    out
}

/// Minimal header block substituted when the frame has no stored header
fn default_header() -> &'static str {
    "_array_data.header_convention \"nanocbf empty\"\r\n\
     _array_data.header_contents\r\n\
     ;\r\n\
     ;\r\n\r\n"
}

/// Sanitize a target file name into a data block identifier: strip path
/// components, drop a `.cbf` suffix, and replace whitespace with
/// underscores
fn base_name(target_name: &str) -> String {
    let file = target_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(target_name);

    let stem = file.strip_suffix(".cbf").unwrap_or(file);

    stem.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
