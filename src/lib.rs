#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which `z = z * z + c`, iterated from zero, never runs off to
//! infinity.  An escape-time image colors every pixel by how many
//! iterations its point survives before it leaves a fixed circle:
//! points that leave at once are painted white, and points that never
//! leave (the black heart of the set) are painted black.
//!
//! Every pixel is independent, so the work spreads over threads
//! trivially.  The interesting part is the dealing: a
//! `CoordGenerator` hands out pixels from a single atomic counter, so
//! each worker grabs its next pixel without a lock and no pixel is
//! ever painted twice or skipped.

pub mod buffer;
pub mod config;
pub mod error;
pub mod escape;
pub mod generator;
pub mod pgm;
pub mod planes;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};
pub use generator::CoordGenerator;
pub use pgm::{write_image, Format};
pub use planes::{Pixel, PlaneMapper};
pub use render::{render, render_single};
