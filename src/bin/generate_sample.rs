use std::path::Path;

use anyhow::{Context, Result};
use histogrid::{
    CellGrid, DatasetConfig, GridAssignment, Selector, color_histograms, hue_histograms,
    load_grid_file, load_samples, luminance_histograms,
};
use image::{Rgb, RgbImage};
use serde_json::json;

const IMAGE_SIDE: u32 = 32;
const GRID_SIDE: usize = 4;

/// xoshiro256** stream whose state is filled from `seed` by an LCG, so the
/// generated collection is identical on every run.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// A noisy vertical gradient around one base colour.
fn generate_image(base: [f64; 3], brightness: f64, rng: &mut SimpleRng) -> RgbImage {
    RgbImage::from_fn(IMAGE_SIDE, IMAGE_SIDE, |_, y| {
        let shade = brightness * (0.6 + 0.4 * y as f64 / IMAGE_SIDE as f64);
        let px = base.map(|c| {
            let noise = (rng.next_f64() - 0.5) * 30.0;
            (c * shade + noise).clamp(0.0, 255.0) as u8
        });
        Rgb(px)
    })
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
        .0
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let palette = [
        [230.0, 60.0, 40.0],
        [60.0, 200.0, 70.0],
        [50.0, 90.0, 230.0],
        [220.0, 200.0, 50.0],
    ];

    let config = DatasetConfig {
        directory: "sample_data".into(),
        count: 48,
        bins: 8,
    };
    std::fs::create_dir_all(&config.directory).context("creating sample_data/")?;
    let index = config.index();
    for i in 0..config.count {
        let base = palette[i % palette.len()];
        let brightness = 0.3 + 0.7 * rng.next_f64();
        let image = generate_image(base, brightness, &mut rng);
        let path = index.path_of(i);
        image
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    println!(
        "Wrote {} images ({IMAGE_SIDE}x{IMAGE_SIDE}) to {}",
        config.count,
        config.directory.display()
    );

    // Every other image, so sample positions differ from collection indices.
    let samples = load_samples(&index, &Selector::indices((0..config.count).step_by(2)))?;
    let grey = luminance_histograms(&samples, config.bins)?;
    let color = color_histograms(&samples, config.bins)?;
    let hue = hue_histograms(&samples, config.bins)?;
    println!(
        "Features for {} samples: luminance {}, color {}, hue {}",
        samples.len(),
        grey.cols(),
        color.cols(),
        hue.cols()
    );

    // Stand-in for a trained map: dominant hue picks the row,
    // dominant grey level picks the column.
    let mut grid = CellGrid::new(GRID_SIDE, GRID_SIDE);
    for pos in 0..samples.len() {
        let row = argmax(hue.row(pos)) * GRID_SIDE / config.bins;
        let col = argmax(grey.row(pos)) * GRID_SIDE / config.bins;
        grid.push(row, col, pos)?;
    }

    let (rows, cols) = grid.dimensions();
    let cells: Vec<Vec<&[usize]>> = (0..rows)
        .map(|r| (0..cols).map(|c| grid.samples_at(r, c)).collect())
        .collect();
    let grid_path = Path::new("sample_grid.json");
    let grid_json = json!({ "rows": rows, "cols": cols, "cells": cells });
    std::fs::write(grid_path, serde_json::to_string_pretty(&grid_json)?)
        .context("writing sample_grid.json")?;

    let reloaded = load_grid_file(grid_path)?;
    let page = histogrid::render(&samples, &reloaded, Path::new("sample_grid"))?;
    println!("Wrote {}x{} grid page to {}", rows, cols, page.display());
    Ok(())
}
