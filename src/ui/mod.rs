//! Static HTML page showing a grid clustering of a sample set.

pub mod page;
pub mod table;

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::data::grid::GridAssignment;
use crate::data::model::SampleSet;
use crate::error::{Error, Result};

use page::{CLOSING, DOCUMENT_EXTENSION, PREAMBLE};

/// Append `.html` to `path` unless it already ends with it.
///
/// The check is a plain, case-sensitive suffix test on the whole path, so a
/// file named just `.html` is kept as is.
/// Returns the path to write and whether it had to be changed.
pub fn normalize_output_path(path: &Path) -> (PathBuf, bool) {
    let suffix = format!(".{DOCUMENT_EXTENSION}");
    if path.as_os_str().to_string_lossy().ends_with(&suffix) {
        return (path.to_path_buf(), false);
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(&suffix);
    (PathBuf::from(name), true)
}

/// Build the complete page for `grid` over `samples`.
pub fn render_to_string<G: GridAssignment + ?Sized>(
    samples: &SampleSet,
    grid: &G,
) -> Result<String> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut doc = String::from(PREAMBLE);
    table::write_rows(&mut doc, samples, grid)?;
    doc.push_str(CLOSING);
    Ok(doc)
}

/// Write the grid page for `grid` over `samples` to `output_path`.
///
/// The page is assembled and checked in memory first, so an invalid grid
/// never leaves a file behind. Returns the path actually written, which has
/// `.html` appended when `output_path` lacked it.
pub fn render<G: GridAssignment + ?Sized>(
    samples: &SampleSet,
    grid: &G,
    output_path: &Path,
) -> Result<PathBuf> {
    let doc = render_to_string(samples, grid)?;

    let (path, appended) = normalize_output_path(output_path);
    if appended {
        info!(
            "{} is not an html file, appending extension: {}",
            output_path.display(),
            path.display()
        );
    }

    write_document(&path, &doc).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    info!("grid page written to {}", path.display());
    Ok(path)
}

fn write_document(path: &Path, doc: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(doc.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_extension_is_kept() {
        let (p, appended) = normalize_output_path(Path::new("out/map.html"));
        assert_eq!(p, PathBuf::from("out/map.html"));
        assert!(!appended);
    }

    #[test]
    fn bare_dot_html_name_is_kept() {
        for input in [".html", "out/.html"] {
            let (p, appended) = normalize_output_path(Path::new(input));
            assert_eq!(p, PathBuf::from(input));
            assert!(!appended);
        }
    }

    #[test]
    fn other_extensions_get_html_appended() {
        let cases = [
            ("map", "map.html"),
            ("map.htm", "map.htm.html"),
            ("map.HTML", "map.HTML.html"),
        ];
        for (input, expected) in cases {
            let (p, appended) = normalize_output_path(Path::new(input));
            assert_eq!(p, PathBuf::from(expected));
            assert!(appended);
        }
    }

    #[test]
    fn empty_sample_set_is_rejected() {
        let samples = SampleSet::from_sorted(Path::new("d"), Vec::new());
        let grid: Vec<Vec<Vec<usize>>> = vec![vec![vec![]]];
        assert!(matches!(render_to_string(&samples, &grid), Err(Error::EmptyInput)));
    }
}
