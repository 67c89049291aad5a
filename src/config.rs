use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::DatasetIndex;
use crate::histogram::DEFAULT_BINS;

/// Where the collection lives and how features are binned.
///
/// Every field is optional in JSON; missing ones fall back to the
/// defaults of the Wang collection layout:
///
/// ```json
/// { "directory": "Wang_Data", "count": 1000, "bins": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Root directory holding `<i>.jpg` files.
    pub directory: PathBuf,
    /// Number of images in the collection.
    pub count: usize,
    /// Buckets per histogram (per channel for colour histograms).
    pub bins: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("Wang_Data"),
            count: 1000,
            bins: DEFAULT_BINS,
        }
    }
}

impl DatasetConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).context("parsing dataset config")
    }

    pub fn index(&self) -> DatasetIndex {
        DatasetIndex::new(&self.directory, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: DatasetConfig = serde_json::from_str(r#"{ "count": 40 }"#).unwrap();
        assert_eq!(cfg.count, 40);
        assert_eq!(cfg.directory, PathBuf::from("Wang_Data"));
        assert_eq!(cfg.bins, 10);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: std::result::Result<DatasetConfig, _> =
            serde_json::from_str(r#"{ "bin": 4 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn index_uses_directory_and_count() {
        let cfg = DatasetConfig {
            directory: PathBuf::from("imgs"),
            count: 3,
            bins: 8,
        };
        let index = cfg.index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.path_of(2), PathBuf::from("imgs").join("2.jpg"));
    }
}
