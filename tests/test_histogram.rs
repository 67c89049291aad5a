// tests/test_histogram.rs: Feature extraction over loaded samples.

mod common;

use histogrid::{
    DEFAULT_BINS, Error, HistogramKind, Selector, color_histograms, histogram, hue_histograms,
    load, load_samples, luminance_histograms,
};
use tempfile::tempdir;

use common::{SIDE, write_collection};

const PIXELS: f64 = (SIDE * SIDE) as f64;

#[test]
fn luminance_counts_every_pixel() {
    let dir = tempdir().unwrap();
    let index = write_collection(dir.path(), 4);
    let samples = load_samples(&index, &Selector::All).unwrap();

    let m = luminance_histograms(&samples, DEFAULT_BINS).unwrap();
    assert_eq!((m.rows(), m.cols()), (4, DEFAULT_BINS));
    for row in m.iter_rows() {
        assert_eq!(row.iter().sum::<f64>(), PIXELS);
    }
}

#[test]
fn color_width_is_bins_times_channels() {
    let dir = tempdir().unwrap();
    let index = write_collection(dir.path(), 3);
    let samples = load_samples(&index, &Selector::All).unwrap();

    for bins in [1, 4, 16] {
        let m = color_histograms(&samples, bins).unwrap();
        assert_eq!(m.cols(), bins * 3);
        assert_eq!(m.cols(), HistogramKind::Color.width(bins));
        for row in m.iter_rows() {
            for channel in row.chunks(bins) {
                assert_eq!(channel.iter().sum::<f64>(), PIXELS);
            }
        }
    }
}

#[test]
fn color_channels_are_in_rgb_order() {
    // Image 0 is roughly (0, 255, 100): red in the first bucket, green in the last.
    let dir = tempdir().unwrap();
    let index = write_collection(dir.path(), 1);
    let samples = load_samples(&index, &Selector::All).unwrap();

    let row = color_histograms(&samples, 2).unwrap().row(0).to_vec();
    assert_eq!(row[..2], [PIXELS, 0.0]);
    assert_eq!(row[2..4], [0.0, PIXELS]);
    assert_eq!(row[4..6], [PIXELS, 0.0]);
}

#[test]
fn hue_counts_every_pixel() {
    let dir = tempdir().unwrap();
    let index = write_collection(dir.path(), 5);
    let samples = load_samples(&index, &Selector::range(1, 5)).unwrap();

    let m = hue_histograms(&samples, 12).unwrap();
    assert_eq!(m.rows(), 4);
    for row in m.iter_rows() {
        assert_eq!(row.iter().sum::<f64>(), PIXELS);
    }
}

#[test]
fn rows_follow_sample_set_order() {
    let dir = tempdir().unwrap();
    let index = write_collection(dir.path(), 6);
    let all = load_samples(&index, &Selector::All).unwrap();
    let some = load_samples(&index, &Selector::indices([5, 2])).unwrap();

    let full = color_histograms(&all, 8).unwrap();
    let part = color_histograms(&some, 8).unwrap();
    assert_eq!(part.row(0), full.row(2));
    assert_eq!(part.row(1), full.row(5));
}

#[test]
fn every_extractor_rejects_an_empty_sample_set() {
    let dir = tempdir().unwrap();
    let empty = load(dir.path(), 10, &Selector::indices([])).unwrap();
    assert!(empty.is_empty());

    for kind in [HistogramKind::Luminance, HistogramKind::Color, HistogramKind::Hue] {
        let err = histogram::extract(&empty, kind, DEFAULT_BINS).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(err.to_string().contains("load samples first"));
    }
}
