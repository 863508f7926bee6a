// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window onto the complex plane described by its center and a
//! zoom factor.  At a zoom of 1.0 the window is 2.0 units wide and
//! 2.0 units tall.
use errors::Error;
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a point in a region: column first, then row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto the complex plane.
#[derive(Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The point of the complex plane shown at the middle of the image.
    pub center: Complex<f64>,
    /// Magnification; larger values show a smaller window.
    pub zoom: f64,
    // The width and height of a single pixel on the complex plane
    // before zooming.
    pixel_scale: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, and the
    /// center and magnification of the window onto the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
        zoom: f64,
    ) -> Result<PlaneMapper, Error> {
        if width == 0 || height == 0 {
            return Err(Error::Viewport(format!(
                "an image of {}x{} pixels has no area",
                width, height
            )));
        }

        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(Error::Viewport(format!(
                "the zoom factor must be a positive number, got {}",
                zoom
            )));
        }

        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(Error::Viewport(format!(
                "the center {} is not a finite point",
                center
            )));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            center,
            zoom,
            pixel_scale: (2.0 / (width as f64), 2.0 / (height as f64)),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// corresponding point on the complex plane.  The middle pixel
    /// (rounded down) maps exactly onto the center.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let dx = pixel.0 as f64 - (self.integral_plane.0 / 2) as f64;
        let dy = pixel.1 as f64 - (self.integral_plane.1 / 2) as f64;
        Complex::new(
            self.center.re + self.pixel_scale.0 * dx / self.zoom,
            self.center.im + self.pixel_scale.1 * dy / self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_planes() {
        let pm = PlaneMapper::new(0, 4, Complex::new(0.0, 0.0), 1.0);
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_zoom() {
        assert!(PlaneMapper::new(4, 4, Complex::new(0.0, 0.0), 0.0).is_err());
        assert!(PlaneMapper::new(4, 4, Complex::new(0.0, 0.0), -2.0).is_err());
        assert!(PlaneMapper::new(4, 4, Complex::new(0.0, 0.0), std::f64::NAN).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-0.5, 0.0), 1.0).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn middle_pixel_maps_to_center() {
        let pm = PlaneMapper::new(1024, 1024, Complex::new(-0.5, 0.25), 3.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(512, 512)), Complex::new(-0.5, 0.25));
    }

    #[test]
    fn pixel_to_point_on_unzoomed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(0.0, 0.0), 1.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-1.0, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(0.5, -0.5));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 3)), Complex::new(0.0, 0.5));
    }

    #[test]
    fn zooming_shrinks_the_window() {
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, 1.0), 2.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.5, 0.5));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex::new(1.25, 1.25));
    }
}
