// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::{info, warn};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

use mandelbrot::{Config, Error, Format};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn parse_threads(s: &str) -> Option<usize> {
    match s {
        AUTO => Some(num_cpus::get()),
        _ => usize::from_str(s).ok(),
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const FRAME: &str = "frame";
const ORIGIN: &str = "origin";
const ITERATIONS: &str = "iterations";
const BOUND: &str = "bound";
const THREADS: &str = "threads";
const FORMAT: &str = "format";
const AUTO: &str = "auto";

/// The library's defaults, spelled the way the options are parsed.
struct Defaults {
    size: String,
    frame: String,
    origin: String,
    iterations: String,
    bound: String,
    threads: String,
}

impl Defaults {
    fn new(config: &Config) -> Defaults {
        Defaults {
            size: format!("{}x{}", config.image_width, config.image_height),
            frame: format!("{}x{}", config.frame_width, config.frame_height),
            origin: format!("{},{}", config.frame_origin.re, config.frame_origin.im),
            iterations: config.max_escape_time.to_string(),
            bound: config.bound_squared.to_string(),
            threads: config.worker_count.to_string(),
        }
    }
}

fn app<'a>(defaults: &'a Defaults) -> App<'a, 'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Parallel escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("fractal.pgm")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value(&defaults.size)
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, in pixels"),
        )
        .arg(
            Arg::with_name(FRAME)
                .long(FRAME)
                .short("f")
                .takes_value(true)
                .default_value(&defaults.frame)
                .validator(|s| validate_pair::<f64>(&s, 'x', "Could not parse complex frame size"))
                .help("Width and height of the region of the complex plane to render"),
        )
        .arg(
            Arg::with_name(ORIGIN)
                .long(ORIGIN)
                .short("c")
                .takes_value(true)
                .default_value(&defaults.origin)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse frame origin"))
                .help("Complex point at the center of the image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value(&defaults.iterations)
                .validator(|s| validate_number::<u32>(&s, "Could not parse iteration count"))
                .help("Maximum escape time"),
        )
        .arg(
            Arg::with_name(BOUND)
                .long(BOUND)
                .short("b")
                .takes_value(true)
                .default_value(&defaults.bound)
                .validator(|s| validate_number::<f64>(&s, "Could not parse escape bound"))
                .help("Squared radius a point must leave to escape"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(&defaults.threads)
                .validator(|s| match parse_threads(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse thread count".to_string()),
                })
                .help("Number of worker threads, or 'auto' for one per CPU"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .long(FORMAT)
                .takes_value(true)
                .possible_values(&["plain", "binary"])
                .default_value("plain")
                .help("Graymap flavor: plain text (P2) or binary (P5)"),
        )
}

fn value<'m, T, F>(matches: &'m ArgMatches, name: &str, parse: F) -> Result<T, Error>
where
    F: Fn(&'m str) -> Option<T>,
{
    matches
        .value_of(name)
        .and_then(parse)
        .ok_or_else(|| Error::Config(format!("could not parse --{}", name)))
}

fn config(matches: &ArgMatches) -> Result<Config, Error> {
    let (image_width, image_height) = value(matches, SIZE, |s| parse_pair(s, 'x'))?;
    let (frame_width, frame_height) = value(matches, FRAME, |s| parse_pair(s, 'x'))?;
    let config = Config {
        image_width,
        image_height,
        frame_width,
        frame_height,
        frame_origin: value(matches, ORIGIN, parse_complex)?,
        max_escape_time: value(matches, ITERATIONS, |s| u32::from_str(s).ok())?,
        bound_squared: value(matches, BOUND, |s| f64::from_str(s).ok())?,
        worker_count: value(matches, THREADS, parse_threads)?,
    };
    config.validate()?;

    let cpus = num_cpus::get();
    if config.worker_count > cpus {
        warn!(
            "{} workers requested but only {} CPUs are available",
            config.worker_count, cpus
        );
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = config(matches)?;
    let format = value(matches, FORMAT, |s| Format::from_str(s).ok())?;
    let output = value(matches, OUTPUT, |s| Some(Path::new(s)))?;

    info!("Generating fractal...");
    let pixels = mandelbrot::render(&config)?;

    info!("Writing image to disk...");
    mandelbrot::write_image(
        output,
        format,
        &pixels,
        (config.image_width, config.image_height),
    )?;
    info!("Wrote {} graymap to {}", format, output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let defaults = Defaults::new(&Config::default());
    let matches = app(&defaults).get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
