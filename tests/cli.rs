// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

use mandelbrot::{render, Config};

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

fn tiny() -> Config {
    Config {
        image_width: 8,
        image_height: 6,
        ..Config::default()
    }
}

#[test]
fn writes_a_plain_graymap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.pgm");

    mandel()
        .args(&["--output", path.to_str().unwrap(), "--size", "8x6", "--threads", "3"])
        .assert()
        .success();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("P2"));
    assert_eq!(lines.next(), Some("8 6"));
    assert_eq!(lines.next(), Some("255"));
    let samples: Vec<u8> = lines.map(|l| l.parse().unwrap()).collect();
    assert_eq!(samples, render(&tiny()).unwrap());
    assert!(text.ends_with('\n'));
}

#[test]
fn writes_a_binary_graymap_other_readers_understand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.pgm");

    mandel()
        .args(&["-o", path.to_str().unwrap(), "-s", "8x6", "--format", "binary"])
        .assert()
        .success();

    let image = image::open(&path).unwrap().to_luma();
    assert_eq!(image.dimensions(), (8, 6));
    assert_eq!(image.into_raw(), render(&tiny()).unwrap());
}

#[test]
fn auto_threads_render_the_same_image() {
    let dir = tempfile::tempdir().unwrap();
    let one = dir.path().join("one.pgm");
    let auto = dir.path().join("auto.pgm");

    for (path, threads) in &[(&one, "1"), (&auto, "auto")] {
        mandel()
            .args(&["-o", path.to_str().unwrap(), "-s", "16x9", "-t", *threads])
            .assert()
            .success();
    }
    assert_eq!(fs::read(&one).unwrap(), fs::read(&auto).unwrap());
}

#[test]
fn zero_threads_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.pgm");

    mandel()
        .args(&["-o", path.to_str().unwrap(), "--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker count must be at least 1"));
    assert!(!path.exists());
}

#[test]
fn empty_images_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.pgm");

    mandel()
        .args(&["-o", path.to_str().unwrap(), "--size", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1x1"));
    assert!(!path.exists());
}

#[test]
fn unwritable_output_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("fractal.pgm");

    mandel()
        .args(&["-o", path.to_str().unwrap(), "-s", "4x4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not write image"));
}

#[test]
fn malformed_sizes_are_rejected_by_the_parser() {
    mandel()
        .args(&["--size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn huge_thread_counts_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.pgm");

    mandel()
        .args(&["-o", path.to_str().unwrap(), "-s", "8x6", "-t", "1000000000000"])
        .assert()
        .success();

    let text = fs::read_to_string(&path).unwrap();
    let samples: Vec<u8> = text.lines().skip(3).map(|l| l.parse().unwrap()).collect();
    assert_eq!(samples, render(&tiny()).unwrap());
}
