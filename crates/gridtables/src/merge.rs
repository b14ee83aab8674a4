//! Concatenate split tables that share a header

use std::fs;
use std::path::{Path, PathBuf};

use gridtables_core::{CellValue, Grid};
use gridtables_csv::{CsvReadOptions, CsvReader};
use walkdir::WalkDir;

use crate::error::Result;

/// Options for [`merge_csv`]
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Only files whose name starts with this are merged
    pub file_prefix: String,
    /// Only files whose name ends with `<tail>.csv` are merged
    pub tail: String,
    /// Remove files whose header does not match the first one
    pub delete_mismatched: bool,
    /// How each file is parsed
    pub read: CsvReadOptions,
}

/// Why a file's header was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderMismatch {
    #[error("too many columns: expected {expected}, found {found}")]
    TooManyColumns { expected: usize, found: usize },

    #[error("too few columns: expected {expected}, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    /// Same width, different names; only the differing columns are listed
    #[error("header mismatch: {found:?} should be {expected:?}")]
    Names {
        found: Vec<String>,
        expected: Vec<String>,
    },
}

/// Result of [`merge_csv`]
#[derive(Debug)]
pub struct MergeReport {
    /// The first header followed by every accepted file's data rows
    pub grid: Grid,
    /// Files whose rows are in `grid`, in merge order
    pub merged: Vec<PathBuf>,
    /// Files left out, with the reason
    pub rejected: Vec<(PathBuf, HeaderMismatch)>,
}

/// Merge every matching CSV file under `root` into one grid
///
/// The first file (in walk order, by file name) fixes the header. Files with
/// a different width or different column names are rejected and, when
/// `delete_mismatched` is set, removed. Files with no rows are ignored.
pub fn merge_csv<P: AsRef<Path>>(root: P, options: &MergeOptions) -> Result<MergeReport> {
    let root = root.as_ref();
    let suffix = format!("{}.csv", options.tail);

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut merged = Vec::new();
    let mut rejected = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_file()
            || !name.starts_with(&options.file_prefix)
            || !name.ends_with(&suffix)
        {
            continue;
        }

        let path = entry.path();
        let grid = CsvReader::read_file(path, &options.read)?;
        let Some(first_row) = grid.row(0) else {
            tracing::debug!(path = %path.display(), "empty file ignored");
            continue;
        };
        let names = header_names(first_row);

        if let Some(expected) = &header {
            if let Some(mismatch) = compare_headers(expected, &names) {
                tracing::warn!(path = %path.display(), %mismatch, "header rejected");
                if options.delete_mismatched {
                    fs::remove_file(path)?;
                    tracing::info!(path = %path.display(), "mismatched file deleted");
                }
                rejected.push((path.to_path_buf(), mismatch));
                continue;
            }
        } else {
            rows.push(first_row.to_vec());
            header = Some(names);
        }

        rows.extend(grid.rows().skip(1).map(<[CellValue]>::to_vec));
        merged.push(path.to_path_buf());
    }

    let grid = Grid::from_rows(rows)?;
    tracing::info!(
        files = merged.len(),
        rejected = rejected.len(),
        rows = grid.row_count(),
        "csv files merged"
    );
    Ok(MergeReport {
        grid,
        merged,
        rejected,
    })
}

fn header_names(row: &[CellValue]) -> Vec<String> {
    row.iter().map(ToString::to_string).collect()
}

fn compare_headers(expected: &[String], found: &[String]) -> Option<HeaderMismatch> {
    if found.len() > expected.len() {
        return Some(HeaderMismatch::TooManyColumns {
            expected: expected.len(),
            found: found.len(),
        });
    }
    if found.len() < expected.len() {
        return Some(HeaderMismatch::TooFewColumns {
            expected: expected.len(),
            found: found.len(),
        });
    }

    let (found, expected): (Vec<String>, Vec<String>) = found
        .iter()
        .zip(expected)
        .filter(|(f, e)| f != e)
        .map(|(f, e)| (f.clone(), e.clone()))
        .unzip();
    if found.is_empty() {
        None
    } else {
        Some(HeaderMismatch::Names { found, expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn options() -> MergeOptions {
        MergeOptions {
            file_prefix: "zz".to_string(),
            tail: "_TEP".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merges_matching_files_across_tree() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "zz_a_1_TEP.csv", "t,v\n1,10\n2,20\n");
        let b = write(dir.path(), "sub/zz_b_1_TEP.csv", "t,v\n3,30\n");
        write(dir.path(), "zz_a_1_META.csv", "name\nx\n");
        write(dir.path(), "other_1_TEP.csv", "t,v\n9,90\n");

        let report = merge_csv(dir.path(), &options()).unwrap();

        assert_eq!(report.merged, vec![b, a]);
        assert!(report.rejected.is_empty());
        let rows: Vec<Vec<String>> = report
            .grid
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        assert_eq!(rows, vec![vec!["t", "v"], vec!["3", "30"], vec!["1", "10"], vec!["2", "20"]]);
    }

    #[test]
    fn test_rejects_mismatched_headers() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zz_1_TEP.csv", "t,v\n1,10\n");
        let wide = write(dir.path(), "zz_2_TEP.csv", "t,v,w\n2,20,200\n");
        let narrow = write(dir.path(), "zz_3_TEP.csv", "t\n3\n");
        let renamed = write(dir.path(), "zz_4_TEP.csv", "t,value\n4,40\n");

        let report = merge_csv(dir.path(), &options()).unwrap();

        assert_eq!(report.grid.row_count(), 2);
        assert_eq!(
            report.rejected,
            vec![
                (wide, HeaderMismatch::TooManyColumns { expected: 2, found: 3 }),
                (narrow, HeaderMismatch::TooFewColumns { expected: 2, found: 1 }),
                (
                    renamed.clone(),
                    HeaderMismatch::Names {
                        found: vec!["value".to_string()],
                        expected: vec!["v".to_string()],
                    }
                ),
            ]
        );
        assert!(renamed.exists());
    }

    #[test]
    fn test_delete_mismatched() {
        let dir = tempfile::tempdir().unwrap();
        let keep = write(dir.path(), "zz_1_TEP.csv", "t,v\n1,10\n");
        let drop = write(dir.path(), "zz_2_TEP.csv", "t\n2\n");
        let options = MergeOptions {
            delete_mismatched: true,
            ..options()
        };

        let report = merge_csv(dir.path(), &options).unwrap();

        assert_eq!(report.merged, vec![keep.clone()]);
        assert!(keep.exists());
        assert!(!drop.exists());
    }

    #[test]
    fn test_empty_files_and_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zz_0_TEP.csv", "");

        let report = merge_csv(dir.path(), &options()).unwrap();
        assert!(report.merged.is_empty());
        assert_eq!(report.grid.row_count(), 0);
    }

    #[test]
    fn test_mismatch_messages() {
        let names = HeaderMismatch::Names {
            found: vec!["value".to_string()],
            expected: vec!["v".to_string()],
        };
        assert_eq!(names.to_string(), "header mismatch: [\"value\"] should be [\"v\"]");
        assert_eq!(
            HeaderMismatch::TooFewColumns { expected: 3, found: 1 }.to_string(),
            "too few columns: expected 3, found 1"
        );
    }
}
