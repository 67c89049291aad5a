use std::path::{Path, PathBuf};

use image::RgbImage;

/// Extension every file of the collection carries.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Canonical file name of the image at `index`.
pub fn canonical_name(index: usize) -> String {
    format!("{index}.{IMAGE_EXTENSION}")
}

// ---------------------------------------------------------------------------
// DatasetIndex – the fixed-size collection on disk
// ---------------------------------------------------------------------------

/// Ordered list of the `count` canonical file names (`0.jpg`, `1.jpg`, ...)
/// under one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetIndex {
    directory: PathBuf,
    names: Vec<String>,
}

impl DatasetIndex {
    pub fn new(directory: impl AsRef<Path>, count: usize) -> Self {
        DatasetIndex {
            directory: directory.as_ref().to_path_buf(),
            names: (0..count).map(canonical_name).collect(),
        }
    }

    /// Number of images in the collection.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Full path of the image at `index`. Does not check that `index < len()`.
    pub fn path_of(&self, index: usize) -> PathBuf {
        self.directory.join(canonical_name(index))
    }
}

// ---------------------------------------------------------------------------
// SampleSet – result of one load call
// ---------------------------------------------------------------------------

/// One loaded image, borrowed from a [`SampleSet`].
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    /// Position inside the sample set (the id clustering backends refer to).
    pub position: usize,
    /// Index in the original collection.
    pub index: usize,
    pub name: &'a str,
    pub image: &'a RgbImage,
}

/// Immutable, ordered set of decoded images.
///
/// The three parallel sequences always have the same length and are sorted
/// by ascending original index, whatever order the caller selected them in.
#[derive(Debug, Clone)]
pub struct SampleSet {
    directory: PathBuf,
    indices: Vec<usize>,
    images: Vec<RgbImage>,
    names: Vec<String>,
}

impl SampleSet {
    /// Build from `(original index, image)` pairs that are already in
    /// ascending index order.
    pub(crate) fn from_sorted(directory: &Path, entries: Vec<(usize, RgbImage)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));

        let mut indices = Vec::with_capacity(entries.len());
        let mut images = Vec::with_capacity(entries.len());
        let mut names = Vec::with_capacity(entries.len());
        for (index, image) in entries {
            indices.push(index);
            names.push(canonical_name(index));
            images.push(image);
        }
        SampleSet {
            directory: directory.to_path_buf(),
            indices,
            images,
            names,
        }
    }

    /// Number of loaded samples.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Original collection indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn images(&self) -> &[RgbImage] {
        &self.images
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Translate a sample-set position back to the collection index.
    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// File path of the sample at `position`, rooted at the collection directory.
    pub fn path_of(&self, position: usize) -> Option<PathBuf> {
        self.names.get(position).map(|name| self.directory.join(name))
    }

    pub fn get(&self, position: usize) -> Option<Sample<'_>> {
        Some(Sample {
            position,
            index: *self.indices.get(position)?,
            name: self.names.get(position)?,
            image: self.images.get(position)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample<'_>> + '_ {
        (0..self.len()).filter_map(move |pos| self.get(pos))
    }
}
