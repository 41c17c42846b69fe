// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time function and the grayscale it is painted with.

use num::Complex;

/// The brightest value a pixel can take.
pub const MAX_INTENSITY: u8 = 255;

/// This is our classic iterator function.  It counts how many times
/// `z = z * z + c` can be applied, starting from zero, before `z`
/// leaves the circle whose squared radius is `bound_squared`.  Points
/// that never leave within `max_escape_time` iterations are probably
/// in the Mandelbrot set, and get `max_escape_time`.
pub fn escape_time(c: Complex<f64>, max_escape_time: u32, bound_squared: f64) -> u32 {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..max_escape_time {
        z = z * z + c;
        if z.norm_sqr() > bound_squared {
            return i;
        }
    }
    max_escape_time
}

/// Map an escape time onto a gray level.  Points that escape at once
/// are white; points that never escape are black.
pub fn intensity(escape_time: u32, max_escape_time: u32) -> u8 {
    let remaining = max_escape_time - escape_time.min(max_escape_time);
    let scaled = f64::from(remaining) * f64::from(MAX_INTENSITY) / f64::from(max_escape_time);
    scaled.round() as u8
}
