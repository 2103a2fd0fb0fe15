//! Write a small frame two ways, then read one back.
//!
//! Mirrors a typical detector workflow: produce a file with the default
//! header, another with a detector-style header, and verify the round trip.
//! File I/O lives out here in the driver; the codec itself only sees byte
//! buffers.

use std::fs;

use nanocbf::{read, write, Frame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pixels = vec![100, 200, 300, 400];

    // Default header
    let mut frame = Frame::new();
    frame.set_pixels(pixels.clone(), 2, 2);
    let bytes = write(&frame, "test_output.cbf")?;
    fs::write("test_output.cbf", &bytes)?;
    println!("wrote test_output.cbf ({} bytes, default header)", bytes.len());

    // Custom detector header
    let custom_header = "_array_data.header_convention \"PILATUS_1.2\"\r\n\
        _array_data.header_contents\r\n\
        ;\r\n\
        # Detector: PILATUS 100K, S/N 60-0100\r\n\
        # Pixel_size 172e-6 m x 172e-6 m\r\n\
        # Exposure_time 1.0 s\r\n\
        ;\r\n\r\n";

    let mut frame2 = Frame::new();
    frame2.set_header(custom_header.to_string());
    frame2.set_pixels(pixels, 2, 2);
    let custom_bytes = write(&frame2, "test_custom.cbf")?;
    fs::write("test_custom.cbf", &custom_bytes)?;
    println!("wrote test_custom.cbf ({} bytes, custom header)", custom_bytes.len());

    // Read the default-header file back
    let back = read(&fs::read("test_output.cbf")?)?;
    println!("read back: {}x{}", back.width, back.height);
    println!("pixels: {:?}", back.pixels);

    Ok(())
}
