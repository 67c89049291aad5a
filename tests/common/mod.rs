// tests/common/mod.rs: Shared fixtures: a scratch collection of small images.

#![allow(dead_code)]

use std::path::Path;

use histogrid::DatasetIndex;
use image::{Rgb, RgbImage};

pub const SIDE: u32 = 8;

/// Pixel colour used for image `i`, distinct per index.
pub fn colour_of(i: usize) -> Rgb<u8> {
    let i = i as u8;
    Rgb([i.wrapping_mul(40), 255 - i.wrapping_mul(20), 100])
}

/// Write `count` solid `SIDE × SIDE` JPEGs named `<i>.jpg` into `dir`.
pub fn write_collection(dir: &Path, count: usize) -> DatasetIndex {
    let index = DatasetIndex::new(dir, count);
    for i in 0..count {
        RgbImage::from_pixel(SIDE, SIDE, colour_of(i))
            .save(index.path_of(i))
            .unwrap();
    }
    index
}
