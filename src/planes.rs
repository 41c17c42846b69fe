// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper-left corner, and a frame on the complex plane centered on
//! an arbitrary origin.
use num::Complex;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0 and all values are assumed to be non-negative
/// integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel on the integral plane.  Rows grow
/// downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

impl Pixel {
    /// Decompose a linear, row-major offset into a pixel on a plane
    /// `width` pixels wide.
    pub fn from_offset(offset: usize, width: usize) -> Pixel {
        Pixel(offset % width, offset / width)
    }

    /// The linear, row-major offset of this pixel on a plane `width`
    /// pixels wide.
    pub fn offset(&self, width: usize) -> usize {
        self.1 * width + self.0
    }
}

/// Describes the region of the complex plane that the image covers:
/// its width and height, and the point the center of the image lands
/// on.  The aspect ratio of the frame is independent of the image's.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexFrame {
    /// Width of the frame along the real axis.
    pub width: f64,
    /// Height of the frame along the imaginary axis.
    pub height: f64,
    /// The complex point under the center of the image.
    pub origin: Complex<f64>,
}

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a frame on the complex plane.  Maps pixels from one to
/// points on the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The width and height of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The frame on the complex plane the image is mapped onto.
    pub frame: ComplexFrame,
    // Complex units per pixel, horizontally and vertically.
    scale: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Width and height must be non-zero; the
    /// configuration checks that before a mapper is ever built.
    pub fn new(width: usize, height: usize, frame: ComplexFrame) -> PlaneMapper {
        let scale = (
            frame.width / (width as f64),
            frame.height / (height as f64),
        );
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            frame,
            scale,
        }
    }

    /// The offset of a pixel from the root of the image buffer.
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.offset(self.integral_plane.0)
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number under it.  The center of the image lands on the
    /// frame's origin, and the imaginary axis grows upward while rows
    /// grow downward.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let half_width = (self.integral_plane.0 as f64) / 2.0;
        let half_height = (self.integral_plane.1 as f64) / 2.0;
        Complex::new(
            ((pixel.0 as f64) - half_width) * self.scale.0,
            -((pixel.1 as f64) - half_height) * self.scale.1,
        ) + self.frame.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: Complex<f64>) -> ComplexFrame {
        ComplexFrame {
            width: 4.0,
            height: 4.0,
            origin,
        }
    }

    #[test]
    fn offsets_decompose_row_major() {
        let width = 7;
        for offset in 0..7 * 5 {
            let pixel = Pixel::from_offset(offset, width);
            assert_eq!(pixel, Pixel(offset % width, offset / width));
            assert_eq!(pixel.offset(width), offset);
        }
        assert_eq!(Pixel::from_offset(8, width), Pixel(1, 1));
    }

    #[test]
    fn center_pixel_lands_on_origin() {
        let pm = PlaneMapper::new(4, 4, square(Complex::new(0.0, 0.0)));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));

        let origin = Complex::new(-0.75, 0.1);
        let pm = PlaneMapper::new(640, 480, square(origin));
        let center = pm.pixel_to_point(&Pixel(320, 240));
        assert!((center - origin).norm() < 1e-12);
    }

    #[test]
    fn rows_grow_down_while_imaginary_grows_up() {
        let pm = PlaneMapper::new(4, 4, square(Complex::new(0.0, 0.0)));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex::new(1.0, -1.0));
        assert!(pm.pixel_to_point(&Pixel(1, 0)).im > pm.pixel_to_point(&Pixel(1, 1)).im);
    }

    #[test]
    fn aspect_ratios_are_not_corrected() {
        let frame = ComplexFrame {
            width: 4.0,
            height: 1.0,
            origin: Complex::new(0.0, 0.0),
        };
        let pm = PlaneMapper::new(4, 4, frame);
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 0.5));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex::new(1.0, -0.25));
    }

    #[test]
    fn mapping_is_deterministic() {
        let pm = PlaneMapper::new(1366, 768, square(Complex::new(-0.5, 0.3)));
        for &pixel in &[Pixel(0, 0), Pixel(17, 400), Pixel(1365, 767)] {
            let a = pm.pixel_to_point(&pixel);
            let b = pm.pixel_to_point(&pixel);
            assert_eq!(a.re.to_bits(), b.re.to_bits());
            assert_eq!(a.im.to_bits(), b.im.to_bits());
        }
    }

    #[test]
    fn offsets_follow_the_integral_plane() {
        let pm = PlaneMapper::new(5, 3, square(Complex::new(0.0, 0.0)));
        assert_eq!(pm.offset(&Pixel(4, 2)), 14);
    }
}
