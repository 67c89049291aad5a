use std::path::Path;

use log::{debug, info};

use super::filter::{Selector, selected_indices};
use super::model::{DatasetIndex, SampleSet};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode the images of `index` picked by `selector` into a [`SampleSet`].
///
/// Samples are always stored in ascending original-index order. Decoding is
/// fail-fast: the first image that cannot be read or decoded aborts the
/// whole load with [`Error::Decode`] and no sample set is returned.
/// Every image is normalised to 8-bit RGB.
pub fn load_samples(index: &DatasetIndex, selector: &Selector) -> Result<SampleSet> {
    let selected = selected_indices(selector, index.len())?;

    let mut entries = Vec::with_capacity(selected.len());
    for i in selected {
        let path = index.path_of(i);
        debug!("decoding {}", path.display());
        let image = image::open(&path)
            .map_err(|source| Error::Decode {
                index: i,
                path: path.clone(),
                source,
            })?
            .into_rgb8();
        entries.push((i, image));
    }

    let samples = SampleSet::from_sorted(index.directory(), entries);
    info!("{} images loaded!", samples.len());
    Ok(samples)
}

/// Convenience wrapper for `load(directory, count, selector)`.
pub fn load(directory: &Path, count: usize, selector: &Selector) -> Result<SampleSet> {
    load_samples(&DatasetIndex::new(directory, count), selector)
}
