use crate::data::grid::GridAssignment;
use crate::data::model::SampleSet;
use crate::error::{Error, Result};

use super::page::{THUMBNAIL_PX, escape_attr, js_string};

// ---------------------------------------------------------------------------
// Grid table: one <tr> per grid row, one <td> per grid column
// ---------------------------------------------------------------------------

/// Append the table body for `grid` to `out`.
///
/// A non-empty cell shows its first sample as a thumbnail; clicking it opens
/// the overlay with the cell's other samples. The thumbnail itself is not
/// repeated in the overlay. Empty cells are emitted as bare `<td></td>`.
pub fn write_rows<G: GridAssignment + ?Sized>(
    out: &mut String,
    samples: &SampleSet,
    grid: &G,
) -> Result<()> {
    let (rows, cols) = grid.dimensions();
    for row in 0..rows {
        out.push_str("<tr>");
        for col in 0..cols {
            let ids = grid.samples_at(row, col);
            match ids.split_first() {
                None => out.push_str("<td></td>"),
                Some((&first, rest)) => {
                    let resolve = |id: usize| sample_path(samples, row, col, id);
                    let src = escape_attr(&resolve(first)?);
                    let others = rest
                        .iter()
                        .map(|&id| resolve(id).map(|p| js_string(&p)))
                        .collect::<Result<Vec<_>>>()?
                        .join(",");
                    out.push_str(&format!(
                        "<td><img src=\"{src}\" alt=\"{src}\" \
                         style=\"width:{THUMBNAIL_PX}px;height:{THUMBNAIL_PX}px;\" \
                         onclick=\"show_images([{}])\"></td>",
                        escape_attr(&others)
                    ));
                }
            }
        }
        out.push_str("</tr>\n");
    }
    Ok(())
}

/// File path of sample set position `id`, as it appears in the page.
fn sample_path(samples: &SampleSet, row: usize, col: usize, id: usize) -> Result<String> {
    samples
        .path_of(id)
        .map(|p| p.display().to_string())
        .ok_or(Error::UnknownSample {
            row,
            col,
            id,
            len: samples.len(),
        })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::RgbImage;

    use super::*;

    fn samples(indices: &[usize]) -> SampleSet {
        SampleSet::from_sorted(
            Path::new("imgs"),
            indices.iter().map(|&i| (i, RgbImage::new(1, 1))).collect(),
        )
    }

    fn path(name: &str) -> String {
        Path::new("imgs").join(name).display().to_string()
    }

    #[test]
    fn empty_cell_has_no_image() {
        let grid: Vec<Vec<Vec<usize>>> = vec![vec![vec![], vec![0]]];
        let mut out = String::new();
        write_rows(&mut out, &samples(&[4]), &grid).unwrap();

        assert!(out.starts_with("<tr><td></td><td><img "));
        assert_eq!(out.matches("<img").count(), 1);
        assert_eq!(out.matches("<tr>").count(), 1);
    }

    #[test]
    fn positions_are_translated_to_original_indices() {
        // Position 1 of the sample set is image 30.
        let grid: Vec<Vec<Vec<usize>>> = vec![vec![vec![1, 2, 0]]];
        let mut out = String::new();
        write_rows(&mut out, &samples(&[10, 30, 50]), &grid).unwrap();

        let src = path("30.jpg");
        assert!(out.contains(&format!("src=\"{src}\" alt=\"{src}\"")));
        let clicks = format!("show_images(['{}','{}'])", path("50.jpg"), path("10.jpg"));
        assert!(out.contains(&clicks), "{out}");
    }

    #[test]
    fn single_sample_cell_opens_an_empty_list() {
        let grid: Vec<Vec<Vec<usize>>> = vec![vec![vec![0]]];
        let mut out = String::new();
        write_rows(&mut out, &samples(&[7]), &grid).unwrap();
        assert!(out.contains("onclick=\"show_images([])\""));
    }

    #[test]
    fn unknown_sample_id_is_an_error() {
        let grid: Vec<Vec<Vec<usize>>> = vec![vec![vec![], vec![0, 3]]];
        let mut out = String::new();
        let err = write_rows(&mut out, &samples(&[7, 8]), &grid).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownSample { row: 0, col: 1, id: 3, len: 2 }
        ));
    }
}
