// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs of a render, with defaults that produce a 16:9 image of
//! the whole set.

use num::Complex;

use crate::error::{Error, Result};
use crate::planes::{ComplexFrame, PlaneMapper};

/// The aspect ratio of the default image and frame.
pub const ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Everything a render needs to know.  Once validated, nothing in a
/// render can fail except allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Width of the image, in pixels.
    pub image_width: usize,
    /// Height of the image, in pixels.
    pub image_height: usize,
    /// Width of the frame on the complex plane.
    pub frame_width: f64,
    /// Height of the frame on the complex plane.
    pub frame_height: f64,
    /// The complex point under the center of the image.
    pub frame_origin: Complex<f64>,
    /// The iteration cap of the escape-time function.
    pub max_escape_time: u32,
    /// The squared radius a point must leave to have escaped.
    pub bound_squared: f64,
    /// The number of worker threads.
    pub worker_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        let image_width = 1366;
        Config {
            image_width,
            image_height: ((image_width as f64) / ASPECT_RATIO) as usize,
            frame_width: 4.0,
            frame_height: 4.0 / ASPECT_RATIO,
            frame_origin: Complex::new(0.0, 0.0),
            max_escape_time: 255,
            bound_squared: 4.0,
            worker_count: 4,
        }
    }
}

fn positive(value: f64, name: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

impl Config {
    /// Check every option before any work begins.
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(Error::Config(format!(
                "image must be at least 1x1, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.max_escape_time == 0 {
            return Err(Error::Config(
                "iteration limit must be at least 1".to_string(),
            ));
        }
        if self.worker_count == 0 {
            return Err(Error::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        positive(self.frame_width, "frame width")?;
        positive(self.frame_height, "frame height")?;
        positive(self.bound_squared, "escape bound")?;
        if !self.frame_origin.re.is_finite() || !self.frame_origin.im.is_finite() {
            return Err(Error::Config(format!(
                "frame origin must be finite, got {}",
                self.frame_origin
            )));
        }

        // Every worker overshoots the generator's counter once on its
        // way out, so that headroom has to fit too.
        self.pixel_count()?
            .checked_add(self.worker_count)
            .map(|_| ())
            .ok_or_else(|| Error::Config("too many workers for this image".to_string()))
    }

    /// The number of pixels in the image, or an error if that number
    /// does not fit in memory's address space.
    pub fn pixel_count(&self) -> Result<usize> {
        self.image_width
            .checked_mul(self.image_height)
            .ok_or_else(|| {
                Error::Config(format!(
                    "a {}x{} image is too large to address",
                    self.image_width, self.image_height
                ))
            })
    }

    /// The frame on the complex plane the image covers.
    pub fn frame(&self) -> ComplexFrame {
        ComplexFrame {
            width: self.frame_width,
            height: self.frame_height,
            origin: self.frame_origin,
        }
    }

    /// The mapper from this image's pixels onto its frame.
    pub fn plane_mapper(&self) -> PlaneMapper {
        PlaneMapper::new(self.image_width, self.image_height, self.frame())
    }
}
