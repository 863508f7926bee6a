// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes the finished image to disk.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::path::Path;

use buffer::PixelBuffer;
use errors::Error;

/// Encodes the buffer as an 8-bit RGBA PNG at `outfile`.
pub fn write_png(outfile: &Path, pixels: &PixelBuffer) -> Result<(), Error> {
    let output = File::create(outfile)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(
        &pixels.to_rgba_bytes(),
        pixels.width() as u32,
        pixels.height() as u32,
        ColorType::RGBA(8),
    )?;
    Ok(())
}
