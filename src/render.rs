// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders blocks of whole rows into a member's private buffer.

use itertools::iproduct;

use buffer::PixelBuffer;
use color::make_color;
use escape::escape_time;
use planes::{Pixel, PlaneMapper};

/// Everything one member of the group needs to turn a starting row
/// into pixels.  Once built, it is never mutated.
#[derive(Clone, Debug)]
pub struct RowBlockRenderer {
    plane: PlaneMapper,
    max_abs: f64,
    max_iter: usize,
    rank: usize,
    size: usize,
}

impl RowBlockRenderer {
    /// Requires the plane to map pixels through, the escape bound and
    /// iteration cap, and the identity of the rendering member within a
    /// group of `size`.
    pub fn new(
        plane: PlaneMapper,
        max_abs: f64,
        max_iter: usize,
        rank: usize,
        size: usize,
    ) -> RowBlockRenderer {
        assert!(rank < size, "rank {} is not in a group of {}", rank, size);
        RowBlockRenderer {
            plane,
            max_abs,
            max_iter,
            rank,
            size,
        }
    }

    /// The rank of the member this renderer colors for.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Renders rows `start_row..start_row + block_size` into the buffer
    /// at their global position.  No other row of the buffer is written.
    pub fn render_block(&self, buffer: &mut PixelBuffer, block_size: usize, start_row: usize) {
        let (width, height) = (self.plane.integral_plane.0, self.plane.integral_plane.1);
        assert!(
            buffer.width() == width && buffer.height() == height,
            "a {}x{} buffer cannot hold a {}x{} image",
            buffer.width(),
            buffer.height(),
            width,
            height
        );
        assert!(
            start_row + block_size <= height,
            "rows {}..{} run past the end of the image",
            start_row,
            start_row + block_size
        );
        for (row, column) in iproduct!(start_row..start_row + block_size, 0..width) {
            let c = self.plane.pixel_to_point(&Pixel(column, row));
            let iter = escape_time(c, self.max_abs, self.max_iter);
            buffer.set(row, column, make_color(self.max_iter, iter, self.rank, self.size));
        }
    }
}
