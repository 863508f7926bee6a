// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the pixel record and the row-major pixel buffer that every
//! member of the group renders into.  A freshly allocated buffer is
//! entirely zero, which is the value the max-combine treats as "no
//! contribution."

/// A single pixel: three color channels and an opacity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.  Every rendered pixel is fully opaque.
    pub a: u8,
}

impl Rgba {
    /// The all-zero pixel every buffer starts with.
    pub const CLEAR: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Constructor for an opaque pixel.
    pub fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    /// Channel-wise maximum of two pixels.
    pub fn max(self, other: Rgba) -> Rgba {
        Rgba {
            r: self.r.max(other.r),
            g: self.g.max(other.g),
            b: self.b.max(other.b),
            a: self.a.max(other.a),
        }
    }
}

/// A width x height grid of pixels, stored row-major, top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Allocates a buffer with every cell cleared.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixels: vec![Rgba::CLEAR; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels in the buffer.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Describes that the buffer has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixel at the given row and column.
    pub fn get(&self, row: usize, column: usize) -> Rgba {
        self.pixels[self.offset(row, column)]
    }

    /// Overwrites the pixel at the given row and column.
    pub fn set(&mut self, row: usize, column: usize, pixel: Rgba) {
        let offset = self.offset(row, column);
        self.pixels[offset] = pixel;
    }

    /// One full row of pixels.
    pub fn row(&self, row: usize) -> &[Rgba] {
        let start = self.offset(row, 0);
        &self.pixels[start..start + self.width]
    }

    /// Folds another buffer of the same shape into this one, keeping the
    /// channel-wise maximum of every cell.  Since untouched cells are
    /// zero and every real pixel has exactly one writer, the result
    /// holds every contributor's rows regardless of combine order.
    pub fn max_combine(&mut self, other: &PixelBuffer) {
        assert!(
            self.width == other.width && self.height == other.height,
            "cannot combine a {}x{} buffer with a {}x{} buffer",
            self.width,
            self.height,
            other.width,
            other.height
        );
        for (mine, theirs) in self.pixels.iter_mut().zip(other.pixels.iter()) {
            *mine = mine.max(*theirs);
        }
    }

    /// Counts the cells that no member rendered.  Rendered pixels are
    /// always opaque, so a zero opacity marks a cell nobody wrote.
    pub fn unrendered(&self) -> usize {
        self.pixels.iter().filter(|p| p.a == 0).count()
    }

    /// Serialises the buffer as packed RGBA bytes, four per pixel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }

    fn offset(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "pixel ({}, {}) is outside a {}x{} buffer",
            column,
            row,
            self.width,
            self.height
        );
        row * self.width + column
    }
}
