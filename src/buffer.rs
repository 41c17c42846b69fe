// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image buffer the workers paint into.
//!
//! Every worker writes through a shared reference.  Each byte is an
//! `AtomicU8` so that needs no `unsafe`, but no two workers ever touch
//! the same offset: the coordinate generator hands each pixel out once.
//! The stores are therefore relaxed; joining the workers is what makes
//! them visible to the thread that collects the image.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Error, Result};

/// A fixed-size grayscale buffer, one byte per pixel, that any number
/// of threads may write to at disjoint offsets.
#[derive(Debug)]
pub struct SharedImage {
    pixels: Vec<AtomicU8>,
}

impl SharedImage {
    /// Reserve a zeroed buffer of `len` pixels.  Failing to get the
    /// memory is reported rather than aborting the process.
    pub fn allocate(len: usize) -> Result<SharedImage> {
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation(len))?;
        pixels.resize_with(len, || AtomicU8::new(0));
        Ok(SharedImage { pixels })
    }

    /// Paint the pixel at `offset`.  Callers must never share an
    /// offset; the buffer does not check.
    pub fn write(&self, offset: usize, value: u8) {
        self.pixels[offset].store(value, Ordering::Relaxed);
    }

    /// Give up shared access and hand back the plain bytes, in
    /// row-major order.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels.into_iter().map(AtomicU8::into_inner).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_black() {
        let image = SharedImage::allocate(6).unwrap();
        assert_eq!(image.into_pixels(), vec![0; 6]);
    }

    #[test]
    fn writes_land_at_their_offsets() {
        let image = SharedImage::allocate(4).unwrap();
        image.write(3, 200);
        image.write(0, 7);
        assert_eq!(image.into_pixels(), vec![7, 0, 0, 200]);
    }

    #[test]
    fn impossible_allocations_are_errors() {
        match SharedImage::allocate(usize::max_value()) {
            Err(Error::Allocation(len)) => assert_eq!(len, usize::max_value()),
            other => panic!("expected an allocation failure, got {:?}", other),
        }
    }
}
