// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The classic escape-time iterator for the Mandelbrot set.

use num::Complex;

/// Iterates `z = z * z + c`, starting with `z = c`, and returns the
/// number of iterations performed before `|z|` reached `max_abs`.
/// Points that never escape stop one short of the cap, so the result
/// is always in `0..max_iter`.
pub fn escape_time(c: Complex<f64>, max_abs: f64, max_iter: usize) -> usize {
    let bound = max_abs * max_abs;
    let mut z = c;
    let mut iter = 0;
    while z.norm_sqr() < bound && iter + 1 < max_iter {
        z = z * z + c;
        iter += 1;
    }
    iter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_outside_the_bound_escape_immediately() {
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 2.0, 350), 0);
        assert_eq!(escape_time(Complex::new(0.0, -2.0), 2.0, 350), 0);
    }

    #[test]
    fn the_origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 2.0, 350), 349);
    }

    #[test]
    fn interior_points_hit_the_cap() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 2.0, 100), 99);
        assert_eq!(escape_time(Complex::new(-0.1, 0.1), 2.0, 100), 99);
    }

    #[test]
    fn exterior_points_escape_early() {
        // 1 -> 2 -> 5
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 2.0, 350), 1);
        let i = escape_time(Complex::new(0.5, 0.5), 2.0, 350);
        assert!(i > 0 && i < 349);
    }

    #[test]
    fn a_cap_of_one_never_iterates() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 2.0, 1), 0);
    }
}
