//! Histogram features and grid pages for a labeled image collection.
//!
//! ```text
//! DatasetIndex ──load_samples──▶ SampleSet ──┬─▶ histogram::{luminance, color, hue}
//!                                             └─▶ ui::render (+ GridAssignment)
//! ```
//!
//! A [`SampleSet`] is produced by one load call and passed explicitly to
//! every extractor and to the renderer; nothing is cached between calls.

pub mod config;
pub mod data;
pub mod error;
pub mod histogram;
pub mod ui;

pub use config::DatasetConfig;
pub use data::filter::Selector;
pub use data::grid::{CellGrid, GridAssignment, load_grid_file, load_grid_file_sized};
pub use data::loader::{load, load_samples};
pub use data::model::{DatasetIndex, Sample, SampleSet};
pub use error::{Error, Result};
pub use histogram::{
    DEFAULT_BINS, FeatureMatrix, HistogramKind, color_histograms, hue_histograms,
    luminance_histograms,
};
pub use ui::render;
