// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps an escape time to a color.  The colors exist to show which
//! member of the group rendered which rows: every member gets its own
//! band of each channel, and the escape time only moves the pixel up
//! and down inside that band.

use buffer::Rgba;

const MIN_CHANNEL: usize = 8;
const MAX_CHANNEL: usize = 248;

/// The lower bound of each channel for one member, plus the width of
/// the band above it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HueBand {
    /// Lowest red value this member produces.
    pub r_min: u8,
    /// Lowest green value this member produces.
    pub g_min: u8,
    /// Lowest blue value this member produces.
    pub b_min: u8,
    /// Width of the band; every channel stays within `min..=min + range`.
    pub range: u8,
}

impl HueBand {
    /// Picks the band for a member by hashing its rank into one of
    /// `size` slots per channel, a different hash for each channel.
    pub fn for_worker(rank: usize, size: usize) -> HueBand {
        assert!(rank < size, "rank {} is not in a group of {}", rank, size);
        let range = (MAX_CHANNEL - MIN_CHANNEL) / size;
        let slot = |k: usize, o: usize| (MIN_CHANNEL + ((rank * k + o) % size) * range) as u8;
        HueBand {
            r_min: slot(11, 7),
            g_min: slot(23, 11),
            b_min: slot(37, 19),
            range: range as u8,
        }
    }

    /// True if every channel of the pixel lies inside this band.
    pub fn contains(&self, pixel: Rgba) -> bool {
        let inside = |v: u8, min: u8| v >= min && u16::from(v) <= u16::from(min) + u16::from(self.range);
        inside(pixel.r, self.r_min) && inside(pixel.g, self.g_min) && inside(pixel.b, self.b_min)
    }
}

/// Colors one pixel.  The fewer iterations a point took to escape, the
/// brighter it is within the member's band.
pub fn make_color(max_iter: usize, iter: usize, rank: usize, size: usize) -> Rgba {
    assert!(
        iter < max_iter && rank < size,
        "invalid color request: iteration {} of {}, rank {} of {}",
        iter,
        max_iter,
        rank,
        size
    );
    let band = HueBand::for_worker(rank, size);
    let x = 1.0_f32 - (iter as f32) / (max_iter as f32);
    let shade = |min: u8| (x * f32::from(band.range) + f32::from(min)) as u8;
    Rgba::opaque(shade(band.r_min), shade(band.g_min), shade(band.b_min))
}
