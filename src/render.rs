// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time renderer
//!
//! The image is painted by a fixed number of scoped worker threads.
//! They share three things by reference: a `CoordGenerator` that deals
//! out pixels, a `PlaneMapper` that turns those pixels into points on
//! the complex plane, and a `SharedImage` to paint the result into.
//! Each worker pulls a pixel, shades it, writes it, and goes back for
//! another until the generator runs dry.  The generator never deals
//! the same pixel twice, so the workers never collide in the image.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, info};

use crate::buffer::SharedImage;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::escape::{escape_time, intensity};
use crate::generator::CoordGenerator;
use crate::planes::{Pixel, PlaneMapper};

/// Everything needed to turn a pixel into a gray level.
#[derive(Debug)]
struct Shader {
    plane: PlaneMapper,
    max_escape_time: u32,
    bound_squared: f64,
}

impl Shader {
    fn new(config: &Config) -> Shader {
        Shader {
            plane: config.plane_mapper(),
            max_escape_time: config.max_escape_time,
            bound_squared: config.bound_squared,
        }
    }

    fn shade(&self, pixel: &Pixel) -> u8 {
        let c = self.plane.pixel_to_point(pixel);
        intensity(
            escape_time(c, self.max_escape_time, self.bound_squared),
            self.max_escape_time,
        )
    }
}

/// One worker's view of a render.
#[derive(Copy, Clone)]
struct Worker<'a> {
    pixels: &'a CoordGenerator,
    shader: &'a Shader,
    image: &'a SharedImage,
}

impl<'a> Worker<'a> {
    /// Paint pixels until the generator is exhausted, and report how
    /// many this worker painted.
    fn run(self) -> usize {
        let mut painted = 0;
        for pixel in self.pixels {
            let offset = self.shader.plane.offset(&pixel);
            self.image.write(offset, self.shader.shade(&pixel));
            painted += 1;
        }
        painted
    }
}

/// Run `work` on `count` named scoped threads and add up what they
/// return.  A thread that cannot be started or that panics fails the
/// whole batch.
fn run_workers<F>(count: usize, work: F) -> Result<usize>
where
    F: Fn(usize) -> usize + Sync,
{
    let work = &work;
    crossbeam::scope(|spawner| {
        let mut handles: Vec<ScopedJoinHandle<usize>> = Vec::new();
        for id in 0..count {
            let handle = spawner
                .builder()
                .name(format!("render-{}", id))
                .spawn(move |_| work(id))
                .map_err(Error::Spawn)?;
            handles.push(handle);
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| {
                let painted = handle.join().map_err(|_| Error::Worker)?;
                debug!("worker {} painted {} pixels", id, painted);
                Ok(painted)
            })
            .sum::<Result<usize>>()
    })
    .map_err(|_| Error::Worker)?
}

/// Render the image described by `config` on `config.worker_count`
/// threads.  Returns one gray byte per pixel, in row-major order.
///
/// A worker beyond the pixel count could never be dealt a pixel, so
/// at most one worker per pixel is started.
pub fn render(config: &Config) -> Result<Vec<u8>> {
    config.validate()?;
    let len = config.pixel_count()?;
    let image = SharedImage::allocate(len)?;
    let pixels = CoordGenerator::new(config.image_width, config.image_height);
    let shader = Shader::new(config);
    let worker = Worker {
        pixels: &pixels,
        shader: &shader,
        image: &image,
    };
    let workers = config.worker_count.min(len);

    info!(
        "rendering {}x{} on {} workers",
        config.image_width, config.image_height, workers
    );

    let painted = run_workers(workers, |_| worker.run())?;

    debug_assert_eq!(painted, len);
    debug_assert!(pixels.is_exhausted());
    Ok(image.into_pixels())
}

/// Render the image described by `config` on the calling thread,
/// walking the pixels in row-major order.  The worker count is
/// ignored.  The threaded renderer must agree with this byte for byte.
pub fn render_single(config: &Config) -> Result<Vec<u8>> {
    config.validate()?;
    let len = config.pixel_count()?;
    let mut image = Vec::new();
    image
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation(len))?;

    let shader = Shader::new(config);
    for row in 0..config.image_height {
        for column in 0..config.image_width {
            image.push(shader.shade(&Pixel(column, row)));
        }
    }
    Ok(image)
}
