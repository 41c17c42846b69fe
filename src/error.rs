// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a render.  None of these are retried: a
//! render is a single deterministic pass, and any failure aborts it.

use failure::Fail;
use std::io;

/// The failure modes of a render and of writing its image.
#[derive(Debug, Fail)]
pub enum Error {
    /// The configuration was rejected before any work began.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// The output buffer could not be reserved.  Carries the number of
    /// bytes requested.
    #[fail(display = "could not allocate a {} byte image buffer", _0)]
    Allocation(usize),

    /// A worker thread could not be started.
    #[fail(display = "could not start a render worker: {}", _0)]
    Spawn(#[cause] io::Error),

    /// A worker thread panicked.  No partial image is returned.
    #[fail(display = "a render worker panicked")]
    Worker,

    /// The image could not be written.  The rendered pixels are still
    /// held by the caller.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
