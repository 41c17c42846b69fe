// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing rendered images out as portable graymaps.
//!
//! The plain flavor (`P2`) is text: a header of magic number, width and
//! height, and maximum value, then one decimal sample per line.  The
//! binary flavor (`P5`) is handed to the `image` crate's PNM encoder.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;

use crate::error::Result;
use crate::escape::MAX_INTENSITY;

/// Which graymap flavor to write.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Format {
    /// `P2`: one decimal sample per line.
    Plain,
    /// `P5`: one raw byte per sample.
    Binary,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Format, String> {
        match s {
            "plain" => Ok(Format::Plain),
            "binary" => Ok(Format::Binary),
            _ => Err(format!("unknown graymap format {:?}", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Format::Plain => write!(f, "plain"),
            Format::Binary => write!(f, "binary"),
        }
    }
}

fn check_len(pixels: &[u8], bounds: (usize, usize)) -> io::Result<()> {
    if pixels.len() == bounds.0 * bounds.1 {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} pixels do not make a {}x{} image",
                pixels.len(),
                bounds.0,
                bounds.1
            ),
        ))
    }
}

fn dimension(value: usize) -> io::Result<u32> {
    if value > u32::max_value() as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is too large for a graymap dimension", value),
        ));
    }
    Ok(value as u32)
}

/// Write `pixels`, row-major, as a plain (`P2`) graymap.
pub fn write_plain<W: Write>(mut out: W, pixels: &[u8], bounds: (usize, usize)) -> io::Result<()> {
    check_len(pixels, bounds)?;
    write!(out, "P2\n{} {}\n{}\n", bounds.0, bounds.1, MAX_INTENSITY)?;
    for pixel in pixels {
        writeln!(out, "{}", pixel)?;
    }
    Ok(())
}

/// Write `pixels`, row-major, as a binary (`P5`) graymap.
pub fn write_binary<W: Write>(out: W, pixels: &[u8], bounds: (usize, usize)) -> io::Result<()> {
    check_len(pixels, bounds)?;
    let mut encoder =
        PNMEncoder::new(out).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(
        pixels,
        dimension(bounds.0)?,
        dimension(bounds.1)?,
        ColorType::Gray(8),
    )
}

/// Create (or truncate) `path` and write the image into it.  On
/// failure the pixels are untouched and still belong to the caller.
pub fn write_image(
    path: &Path,
    format: Format,
    pixels: &[u8],
    bounds: (usize, usize),
) -> Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    match format {
        Format::Plain => write_plain(&mut output, pixels, bounds)?,
        Format::Binary => write_binary(&mut output, pixels, bounds)?,
    }
    output.flush()?;
    Ok(())
}
