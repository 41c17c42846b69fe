// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A lock-free ticket dispenser for pixels.
//!
//! The renderer needs to hand every pixel of the image to exactly one
//! worker thread.  Rather than putting an iterator behind a mutex, the
//! generator keeps a single atomic counter: each call to `next()`
//! takes a ticket with one `fetch_add` and turns it into a pixel.  A
//! ticket past the end of the image means there is no more work.
//!
//! Because the counter only ever grows, a caller that has been told
//! the image is exhausted can never be handed a pixel later, and no
//! two callers can ever hold the same ticket.  Nobody waits on anybody
//! else; the only cost of contention is the cache line the counter
//! lives on.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::planes::Pixel;

/// Issues every pixel of a `width` x `height` image exactly once, in
/// row-major order, to however many threads share it.
#[derive(Debug)]
pub struct CoordGenerator {
    width: usize,
    max_index: usize,
    next_index: AtomicUsize,
}

impl CoordGenerator {
    /// Both dimensions must be at least one, and `width * height` must
    /// fit in a `usize` with room to spare for one overshoot per
    /// caller.  `Config::validate` checks all of that before a
    /// generator is ever built.
    pub fn new(width: usize, height: usize) -> CoordGenerator {
        debug_assert!(width > 0 && height > 0);
        CoordGenerator {
            width,
            max_index: width * height - 1,
            next_index: AtomicUsize::new(0),
        }
    }

    /// True once every pixel has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.next_index.load(Ordering::SeqCst) > self.max_index
    }

    /// Take the next pixel, or `None` if the image has been exhausted.
    /// Once this returns `None` to anyone, it returns `None` to
    /// everyone.
    pub fn next(&self) -> Option<Pixel> {
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        if index > self.max_index {
            return None;
        }
        Some(Pixel::from_offset(index, self.width))
    }
}

/// A shared reference to a generator is itself an iterator, so a
/// worker can simply loop over it.
impl<'a> Iterator for &'a CoordGenerator {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        CoordGenerator::next(*self)
    }
}

impl<'a> FusedIterator for &'a CoordGenerator {}
