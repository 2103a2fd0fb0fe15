//! The in-memory detector frame

use alloc::string::String;
use alloc::vec::Vec;

/// One detector image: an opaque user header plus a pixel array.
///
/// `pixels` is stored row by row; when it is non-empty,
/// `width * height == pixels.len()` holds. Frames are plain data: nothing
/// is shared, so concurrent use of distinct frames needs no coordination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// User header text, everything between the `data_` line and the
    /// `_array_data.data` tag. May be empty; the writer substitutes a
    /// minimal default block for empty headers.
    pub header: String,
    /// Pixel values, `width * height` signed 32-bit integers
    pub pixels: Vec<i32>,
    /// Fastest dimension
    pub width: u32,
    /// Second dimension
    pub height: u32,
}

impl Frame {
    /// Create an empty frame
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pixel array and dimensions together, keeping the
    /// `width * height == pixels.len()` invariant in one step
    #[inline]
    pub fn set_pixels(&mut self, pixels: Vec<i32>, width: u32, height: u32) {
        self.pixels = pixels;
        self.width = width;
        self.height = height;
    }

    /// Replace the user header text
    #[inline]
    pub fn set_header(&mut self, header: String) {
        self.header = header;
    }

    /// Number of pixels the dimensions declare
    #[inline]
    pub fn element_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_new_frame_is_empty() {
        let frame = Frame::new();
        assert!(frame.header.is_empty());
        assert!(frame.pixels.is_empty());
        assert_eq!(frame.element_count(), 0);
    }

    #[test]
    fn test_set_pixels() {
        let mut frame = Frame::new();
        frame.set_pixels(vec![1, 2, 3, 4, 5, 6], 3, 2);
        assert_eq!(frame.element_count(), 6);
        assert_eq!(frame.pixels.len(), frame.element_count());
    }
}
