/// Data layer: collection index, sample selection, loading and grid input.
///
/// Architecture:
/// ```text
///   <dir>/0.jpg ... <dir>/<count-1>.jpg
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetIndex │  canonical names under one root
///   └──────────────┘
///        │   + Selector (filter: range / explicit set → ascending indices)
///        ▼
///   ┌──────────┐
///   │  loader   │  decode selected images → SampleSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐      ┌──────────────────────────────┐
///   │ SampleSet │ ───▶ │ histogram extractors / ui     │
///   └───────────┘      └──────────────────────────────┘
///                                ▲
///   .json / .csv / .parquet ──▶ grid (GridAssignment)
/// ```

pub mod filter;
pub mod grid;
pub mod loader;
pub mod model;
