use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, UInt64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// GridAssignment – the contract with any clustering backend
// ---------------------------------------------------------------------------

/// Result of a grid clustering (e.g. a self-organizing map) over a sample set.
///
/// Sample identifiers are positions into the [`SampleSet`] the clustering
/// was computed on, not original collection indices.
///
/// [`SampleSet`]: super::model::SampleSet
pub trait GridAssignment {
    /// `(rows, cols)` of the grid.
    fn dimensions(&self) -> (usize, usize);

    /// Ordered sample identifiers assigned to cell `(row, col)`.
    /// Cells outside the grid, or with nothing assigned, yield an empty slice.
    fn samples_at(&self, row: usize, col: usize) -> &[usize];
}

/// Nested `cells[row][col] = ids` layout. Columns are taken from the first row.
impl GridAssignment for Vec<Vec<Vec<usize>>> {
    fn dimensions(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Vec::len))
    }

    fn samples_at(&self, row: usize, col: usize) -> &[usize] {
        self.get(row)
            .and_then(|r| r.get(col))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// CellGrid – dense row-major store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<usize>>,
}

impl CellGrid {
    /// An `rows × cols` grid with every cell empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        CellGrid {
            rows,
            cols,
            cells: vec![Vec::new(); rows * cols],
        }
    }

    /// Build from `cells[row][col]`. Every row must have the same length.
    pub fn from_cells(cells: Vec<Vec<Vec<usize>>>) -> Result<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if let Some((r, row)) = cells.iter().enumerate().find(|(_, row)| row.len() != cols) {
            bail!("Grid row {r} has {} cells, expected {cols}", row.len());
        }
        Ok(CellGrid {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Append `id` to the list of cell `(row, col)`.
    pub fn push(&mut self, row: usize, col: usize, id: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            bail!(
                "Cell ({row}, {col}) is outside a {}x{} grid",
                self.rows,
                self.cols
            );
        }
        self.cells[row * self.cols + col].push(id);
        Ok(())
    }

    /// Total number of assignments over all cells.
    pub fn assigned(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

impl GridAssignment for CellGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn samples_at(&self, row: usize, col: usize) -> &[usize] {
        if row >= self.rows || col >= self.cols {
            return &[];
        }
        &self.cells[row * self.cols + col]
    }
}

// ---------------------------------------------------------------------------
// Grid files
// ---------------------------------------------------------------------------

/// Load a grid assignment written by an external clustering run.
/// Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `{ "rows": R, "cols": C, "cells": [[[ids..], ..], ..] }` and/or
///   `"assignments": [{ "row": r, "col": c, "samples": [ids..] }, ..]`
/// * `.csv`     – header `row,col,sample_id`, one assignment per line
/// * `.parquet` – integer columns `row`, `col`, `sample_id`
///
/// For `.csv` and `.parquet` the grid size is inferred from the largest
/// coordinate; use [`load_grid_file_sized`] when trailing rows or columns
/// may be empty.
pub fn load_grid_file(path: &Path) -> Result<CellGrid> {
    load_grid(path, None)
}

/// Like [`load_grid_file`] but with the grid size fixed by the caller.
/// Coordinates outside `rows × cols` are an error.
pub fn load_grid_file_sized(path: &Path, rows: usize, cols: usize) -> Result<CellGrid> {
    load_grid(path, Some((rows, cols)))
}

fn load_grid(path: &Path, dims: Option<(usize, usize)>) -> Result<CellGrid> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match ext.as_str() {
        "json" => load_json(path, dims)?,
        "csv" => from_triples(load_csv(path)?, dims)?,
        "parquet" | "pq" => from_triples(load_parquet(path)?, dims)?,
        other => bail!("Unsupported grid file extension: .{other}"),
    };
    log::debug!(
        "grid {}: {:?} with {} assignments",
        path.display(),
        grid.dimensions(),
        grid.assigned()
    );
    Ok(grid)
}

/// Build a grid from `(row, col, id)` triples, keeping their order per cell.
fn from_triples(
    triples: Vec<(usize, usize, usize)>,
    dims: Option<(usize, usize)>,
) -> Result<CellGrid> {
    let (rows, cols) = dims.unwrap_or_else(|| {
        triples
            .iter()
            .fold((0, 0), |(r, c), &(row, col, _)| (r.max(row + 1), c.max(col + 1)))
    });
    let mut grid = CellGrid::new(rows, cols);
    for (i, (row, col, id)) in triples.into_iter().enumerate() {
        grid.push(row, col, id).with_context(|| format!("Assignment {i}"))?;
    }
    Ok(grid)
}

// -- JSON --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridJson {
    rows: usize,
    cols: usize,
    #[serde(default)]
    cells: Option<Vec<Vec<Vec<usize>>>>,
    #[serde(default)]
    assignments: Vec<CellJson>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellJson {
    row: usize,
    col: usize,
    samples: Vec<usize>,
}

fn load_json(path: &Path, dims: Option<(usize, usize)>) -> Result<CellGrid> {
    let text = std::fs::read_to_string(path).context("reading JSON grid file")?;
    let root: GridJson = serde_json::from_str(&text).context("parsing JSON grid")?;

    if let Some((rows, cols)) = dims {
        if (rows, cols) != (root.rows, root.cols) {
            bail!(
                "JSON grid is {}x{}, expected {rows}x{cols}",
                root.rows,
                root.cols
            );
        }
    }

    let mut grid = match root.cells {
        Some(cells) => {
            let grid = CellGrid::from_cells(cells)?;
            if grid.dimensions() != (root.rows, root.cols) {
                bail!(
                    "'cells' is {:?} but the grid declares {}x{}",
                    grid.dimensions(),
                    root.rows,
                    root.cols
                );
            }
            grid
        }
        None => CellGrid::new(root.rows, root.cols),
    };

    for cell in root.assignments {
        for id in cell.samples {
            grid.push(cell.row, cell.col, id)?;
        }
    }
    Ok(grid)
}

// -- CSV --

#[derive(Debug, Deserialize)]
struct AssignmentRecord {
    row: usize,
    col: usize,
    sample_id: usize,
}

fn load_csv(path: &Path) -> Result<Vec<(usize, usize, usize)>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV grid file")?;
    let mut triples = Vec::new();
    for (row_no, result) in reader.deserialize::<AssignmentRecord>().enumerate() {
        let rec = result.with_context(|| format!("CSV row {row_no}"))?;
        triples.push((rec.row, rec.col, rec.sample_id));
    }
    Ok(triples)
}

// -- Parquet --

fn load_parquet(path: &Path) -> Result<Vec<(usize, usize, usize)>> {
    let file = std::fs::File::open(path).context("opening parquet grid file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut triples = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<Vec<usize>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet grid missing '{name}' column"))?;
            unsigned_column(batch.column(idx)).with_context(|| format!("column '{name}'"))
        };
        let rows = column("row")?;
        let cols = column("col")?;
        let ids = column("sample_id")?;

        triples.extend(
            rows.into_iter()
                .zip(cols)
                .zip(ids)
                .map(|((r, c), id)| (r, c, id)),
        );
    }
    Ok(triples)
}

/// Read any integer column as non-negative `usize` values.
fn unsigned_column(col: &ArrayRef) -> Result<Vec<usize>> {
    if !col.data_type().is_integer() {
        bail!("Expected an integer column, got {:?}", col.data_type());
    }
    // Negative values do not survive the cast and turn into nulls.
    let unsigned = cast(col, &DataType::UInt64).context("casting to UInt64")?;
    let values = unsigned.as_primitive::<UInt64Type>();

    (0..values.len())
        .map(|row| {
            if values.is_null(row) {
                bail!("Row {row}: null or negative value");
            }
            usize::try_from(values.value(row))
                .with_context(|| format!("Row {row}: value does not fit in usize"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_grid_lookup_by_row_and_column() {
        let mut grid = CellGrid::new(2, 3);
        grid.push(1, 2, 5).unwrap();
        grid.push(1, 2, 9).unwrap();
        grid.push(0, 1, 4).unwrap();

        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.samples_at(1, 2), [5, 9]);
        assert_eq!(grid.samples_at(0, 1), [4]);
        assert!(grid.samples_at(0, 0).is_empty());
        assert!(grid.samples_at(5, 5).is_empty());
        assert_eq!(grid.assigned(), 3);
    }

    #[test]
    fn push_outside_grid_fails() {
        let mut grid = CellGrid::new(2, 2);
        assert!(grid.push(2, 0, 1).is_err());
        assert!(grid.push(0, 2, 1).is_err());
    }

    #[test]
    fn ragged_cells_are_rejected() {
        let res = CellGrid::from_cells(vec![vec![vec![], vec![1]], vec![vec![2]]]);
        assert!(res.is_err());
    }

    #[test]
    fn nested_vec_is_a_grid_assignment() {
        let cells: Vec<Vec<Vec<usize>>> = vec![vec![vec![], vec![3, 1]]];
        assert_eq!(cells.dimensions(), (1, 2));
        assert_eq!(cells.samples_at(0, 1), [3, 1]);
        assert!(cells.samples_at(1, 0).is_empty());
    }

    #[test]
    fn triples_infer_dimensions_and_keep_order() {
        let grid = from_triples(vec![(0, 0, 7), (2, 1, 3), (0, 0, 1)], None).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.samples_at(0, 0), [7, 1]);
        assert_eq!(grid.samples_at(2, 1), [3]);
    }

    #[test]
    fn triples_outside_fixed_dimensions_fail() {
        assert!(from_triples(vec![(3, 0, 1)], Some((3, 3))).is_err());
    }
}
