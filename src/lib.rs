//! nanocbf: minimal reader/writer for CBF detector images
//!
//! CBF (Crystallographic Binary Format) is a hybrid container: a free-form
//! text header followed by a delta-compressed block of signed 32-bit pixel
//! values, framed by literal ASCII markers and a 4-byte binary magic.
//!
//! # File Layout
//!
//! ```text
//! ###CBF: VERSION 1.5 ...            <- version prefix
//! data_<name>                        <- data identifier line
//!                                    <- blank line
//! <user header, opaque text>
//! _array_data.data
//! ;
//! --CIF-BINARY-FORMAT-SECTION--      <- binary section start
//! Content-Type: ...                  <- CRLF metadata fields
//! X-Binary-Size: <n>
//! ...
//!                                    <- blank line
//! 0x0C 0x1A 0x04 0xD5                <- magic
//! <n bytes of byte-offset payload>
//! <4095 zero bytes>
//! --CIF-BINARY-FORMAT-SECTION----    <- binary section end
//! ```
//!
//! # Features
//!
//! - Byte-exact write compatibility with CBF consumers
//! - CBF_BYTE_OFFSET delta compression and decompression
//! - MD5/base64 `Content-MD5` generation for the compressed payload
//! - Lenient decoding of truncated payloads
//! - `no_std` support (`alloc` required); `std` only adds error trait impls
//!
//! # Example
//!
//! ```rust
//! use nanocbf::{read, write, Frame};
//!
//! let mut frame = Frame::new();
//! frame.set_pixels(vec![100, 200, 300, 400], 2, 2);
//!
//! let bytes = write(&frame, "example.cbf")?;
//! let back = read(&bytes)?;
//! assert_eq!(back.width, 2);
//! assert_eq!(back.pixels, vec![100, 200, 300, 400]);
//! # Ok::<(), nanocbf::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod base64;
pub mod byte_offset;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod header;
pub mod md5;
pub mod scan;

// Re-export main types
pub use decoder::read;
pub use encoder::{write, write_with, HeaderMode};
pub use error::Error;
pub use frame::Frame;
pub use header::BinaryHeader;

/// Magic bytes marking the start of the compressed payload
pub const CBF_MAGIC: [u8; 4] = [0x0C, 0x1A, 0x04, 0xD5];

/// Marker opening the binary section metadata block
pub const SECTION_START: &[u8] = b"--CIF-BINARY-FORMAT-SECTION--";

/// Marker closing the binary section (start marker plus four dashes)
pub const SECTION_END: &[u8] = b"--CIF-BINARY-FORMAT-SECTION----";

/// Tag introducing the binary data section of the file
pub const ARRAY_DATA_TAG: &[u8] = b"_array_data.data";

/// Prefix of the data identifier line near the top of the file
pub const DATA_TAG: &[u8] = b"data_";

/// Number of zero bytes padding the payload before the closing marker
pub const PADDING_SIZE: usize = 4095;
