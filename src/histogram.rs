use image::buffer::ConvertBuffer;
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgb32FImage, RgbImage};
use palette::{Hsv, IntoColor, Srgb};

use crate::data::model::SampleSet;
use crate::error::{Error, Result};

/// Buckets per histogram when the caller has no preference.
pub const DEFAULT_BINS: usize = 10;

/// Channels of every decoded sample (images are loaded as 8-bit RGB).
pub const CHANNEL_COUNT: usize = Rgb::<u8>::CHANNEL_COUNT as usize;

// ---------------------------------------------------------------------------
// FeatureMatrix – one histogram row per sample
// ---------------------------------------------------------------------------

/// Row-major matrix of raw bucket counts; row `i` belongs to sample set
/// position `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Histogram of the sample at `position`.
    pub fn row(&self, position: usize) -> &[f64] {
        &self.data[position * self.cols..(position + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Which histogram to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramKind {
    /// Grey level in `[0, 1]`.
    Luminance,
    /// Raw channel values in `[0, 255]`, one block of `bins` per channel.
    Color,
    /// HSV hue in `[0, 1]`.
    Hue,
}

impl HistogramKind {
    /// Width of one feature row.
    pub fn width(self, bins: usize) -> usize {
        match self {
            HistogramKind::Color => bins * CHANNEL_COUNT,
            HistogramKind::Luminance | HistogramKind::Hue => bins,
        }
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Compute one `kind` histogram per sample, in sample set order.
///
/// Bucket edges depend only on the value domain, never on the image, so rows
/// are comparable across samples. Counts are not normalised.
pub fn extract(samples: &SampleSet, kind: HistogramKind, bins: usize) -> Result<FeatureMatrix> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if bins == 0 {
        return Err(Error::InvalidBins);
    }

    let cols = kind.width(bins);
    let mut data = vec![0.0; samples.len() * cols];
    for (image, row) in samples.images().iter().zip(data.chunks_exact_mut(cols)) {
        match kind {
            HistogramKind::Luminance => luminance_row(image, row),
            HistogramKind::Color => color_row(image, row),
            HistogramKind::Hue => hue_row(image, row),
        }
    }

    log::debug!("{kind:?} histograms: {} x {cols}", samples.len());
    Ok(FeatureMatrix {
        rows: samples.len(),
        cols,
        data,
    })
}

/// Grey intensity histogram over `[0, 1]`, `bins` wide.
pub fn luminance_histograms(samples: &SampleSet, bins: usize) -> Result<FeatureMatrix> {
    extract(samples, HistogramKind::Luminance, bins)
}

/// Per-channel intensity histograms over `[0, 255]`, `bins * 3` wide
/// (red, green, blue blocks in that order).
pub fn color_histograms(samples: &SampleSet, bins: usize) -> Result<FeatureMatrix> {
    extract(samples, HistogramKind::Color, bins)
}

/// Hue histogram over `[0, 1]`, `bins` wide.
pub fn hue_histograms(samples: &SampleSet, bins: usize) -> Result<FeatureMatrix> {
    extract(samples, HistogramKind::Hue, bins)
}

/// Luma is taken from float RGB so grey levels are not rounded to 1/255 steps.
fn luminance_row(image: &RgbImage, out: &mut [f64]) {
    let rgb: Rgb32FImage = image.convert();
    let grey: ImageBuffer<Luma<f32>, Vec<f32>> = rgb.convert();
    let levels = grey.pixels().map(|p| f64::from(p[0]).clamp(0.0, 1.0));
    accumulate(levels, 0.0, 1.0, out);
}

fn color_row(image: &RgbImage, out: &mut [f64]) {
    let bins = out.len() / CHANNEL_COUNT;
    for (channel, block) in out.chunks_exact_mut(bins).enumerate() {
        accumulate(image.pixels().map(|p| f64::from(p[channel])), 0.0, 255.0, block);
    }
}

fn hue_row(image: &RgbImage, out: &mut [f64]) {
    let hues = image.pixels().map(|p| {
        let rgb: Srgb<f64> = Srgb::new(p[0], p[1], p[2]).into_format();
        let hsv: Hsv<palette::encoding::Srgb, f64> = rgb.into_color();
        hsv.hue.into_positive_degrees() / 360.0
    });
    accumulate(hues, 0.0, 1.0, out);
}

/// Count `values` into `out.len()` equal-width buckets spanning `[lo, hi]`.
///
/// The last bucket is closed, so `hi` itself is counted. Values outside the
/// domain (and NaN) are dropped.
fn accumulate<I: Iterator<Item = f64>>(values: I, lo: f64, hi: f64, out: &mut [f64]) {
    let bins = out.len();
    let scale = bins as f64 / (hi - lo);
    for v in values {
        if !(lo..=hi).contains(&v) {
            continue;
        }
        let bucket = (((v - lo) * scale) as usize).min(bins - 1);
        out[bucket] += 1.0;
    }
}
