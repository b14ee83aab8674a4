//! Split one sheet into a CSV file per detected table

use std::fs;
use std::path::{Path, PathBuf};

use gridtables_core::{find_table_ranges, DetectOptions, Grid};
use gridtables_csv::{CsvReadOptions, CsvWriteOptions, CsvWriter};

use crate::error::Result;
use crate::open_grid;

/// Options for [`split_file`]
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// File name prefix; defaults to the input file's stem
    pub prefix: Option<String>,
    /// Appended to every output name before `.csv`
    pub tail: String,
    /// Leave the input alone when its first output is not older than it
    pub skip_converted: bool,
    /// How the input is parsed; `None` picks by file extension
    pub read: Option<CsvReadOptions>,
    /// How each table is written
    pub csv: CsvWriteOptions,
}

/// What [`split_file`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// One file per table, in detection order
    Written(Vec<PathBuf>),
    /// Outputs were already up to date
    Skipped,
}

/// Name of the file holding the `index`-th table (1-based)
pub fn table_file_name(prefix: &str, index: usize, tail: &str) -> String {
    format!("{prefix}_{index}{tail}.csv")
}

/// Detect every table in `input` and write each one to `output_dir`
///
/// The directory is created if missing. Tables are written as
/// `<prefix>_1<tail>.csv`, `<prefix>_2<tail>.csv`, ... in
/// `(row_start, col_start)` order.
pub fn split_file<P, Q>(
    input: P,
    output_dir: Q,
    detect: &DetectOptions,
    options: &SplitOptions,
) -> Result<SplitOutcome>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    let prefix = match &options.prefix {
        Some(prefix) => prefix.clone(),
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table".to_string()),
    };

    let first = output_dir.join(table_file_name(&prefix, 1, &options.tail));
    if options.skip_converted && already_converted(input, &first)? {
        tracing::info!(input = %input.display(), "outputs up to date, skipping");
        return Ok(SplitOutcome::Skipped);
    }

    let grid = open_grid(input, options.read.as_ref())?;
    let written = split_grid(&grid, output_dir, &prefix, detect, options)?;
    Ok(SplitOutcome::Written(written))
}

/// Write each table detected in `grid` to `output_dir`
///
/// Numbered outputs left over from an earlier run that found more tables
/// are removed. `options.prefix` is ignored in favour of `prefix`.
pub fn split_grid(
    grid: &Grid,
    output_dir: &Path,
    prefix: &str,
    detect: &DetectOptions,
    options: &SplitOptions,
) -> Result<Vec<PathBuf>> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
        tracing::info!(dir = %output_dir.display(), "created output directory");
    }

    let mut written = Vec::new();
    for (i, range) in find_table_ranges(grid, detect).iter().enumerate() {
        let path = output_dir.join(table_file_name(prefix, i + 1, &options.tail));
        CsvWriter::write_view_file(&grid.view(range)?, &path, &options.csv)?;
        tracing::debug!(path = %path.display(), %range, "table written");
        written.push(path);
    }

    let mut index = written.len() + 1;
    loop {
        let stale = output_dir.join(table_file_name(prefix, index, &options.tail));
        if !stale.is_file() {
            break;
        }
        fs::remove_file(&stale)?;
        tracing::info!(path = %stale.display(), "removed stale table file");
        index += 1;
    }

    Ok(written)
}

/// `true` when `target` exists and was modified no earlier than `source`
pub fn already_converted(source: &Path, target: &Path) -> Result<bool> {
    if !target.exists() {
        return Ok(false);
    }
    let source_time = fs::metadata(source)?.modified()?;
    let target_time = fs::metadata(target)?.modified()?;
    Ok(source_time <= target_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEET: &str = "id,name,,id,qty\n1,bolt,,1,40\n2,nut,,2,15\n\nmonth,in,out,net,note\njan,3,1,2,\n";

    #[test]
    fn test_table_file_name() {
        assert_eq!(table_file_name("report", 3, ""), "report_3.csv");
        assert_eq!(table_file_name("report", 1, "_TEP"), "report_1_TEP.csv");
    }

    #[test]
    fn test_split_file_writes_one_csv_per_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, SHEET).unwrap();
        let out = dir.path().join("out");

        let outcome = split_file(&input, &out, &DetectOptions::default(), &SplitOptions::default()).unwrap();

        let SplitOutcome::Written(paths) = outcome else {
            panic!("expected files to be written");
        };
        assert_eq!(
            paths,
            vec![out.join("stock_1.csv"), out.join("stock_2.csv"), out.join("stock_3.csv")]
        );
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "id,name\n1,bolt\n2,nut\n");
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "id,qty\n1,40\n2,15\n");
        assert_eq!(
            fs::read_to_string(&paths[2]).unwrap(),
            "month,in,out,net,note\njan,3,1,2,\n"
        );
    }

    #[test]
    fn test_tail_is_appended_to_output_names() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, SHEET).unwrap();
        let options = SplitOptions {
            tail: "_converted".to_string(),
            ..Default::default()
        };

        let outcome = split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();
        let SplitOutcome::Written(paths) = outcome else {
            panic!("expected files to be written");
        };
        assert_eq!(paths[0], dir.path().join("stock_1_converted.csv"));
    }

    #[test]
    fn test_read_options_override_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("semi.dat");
        fs::write(&input, "a;b;;c\n1;2;;3\n").unwrap();
        let options = SplitOptions {
            read: Some(CsvReadOptions {
                delimiter: b';',
                ..Default::default()
            }),
            ..Default::default()
        };

        let outcome = split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();
        let SplitOutcome::Written(paths) = outcome else {
            panic!("expected files to be written");
        };
        assert_eq!(paths.len(), 2);
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "c\n3\n");
    }

    #[test]
    fn test_resplit_with_fewer_tables_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, SHEET).unwrap();
        let out = dir.path().join("out");
        let options = SplitOptions::default();

        split_file(&input, &out, &DetectOptions::default(), &options).unwrap();
        assert!(out.join("stock_3.csv").exists());

        fs::write(&input, "only,one\n1,2\n").unwrap();
        let outcome = split_file(&input, &out, &DetectOptions::default(), &options).unwrap();

        assert_eq!(outcome, SplitOutcome::Written(vec![out.join("stock_1.csv")]));
        assert_eq!(fs::read_to_string(out.join("stock_1.csv")).unwrap(), "only,one\n1,2\n");
        assert!(!out.join("stock_2.csv").exists());
        assert!(!out.join("stock_3.csv").exists());
    }

    #[test]
    fn test_empty_sheet_clears_previous_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, SHEET).unwrap();
        let options = SplitOptions::default();

        split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();
        fs::write(&input, ",,\n\n").unwrap();
        let outcome = split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();

        assert_eq!(outcome, SplitOutcome::Written(Vec::new()));
        assert!(!dir.path().join("stock_1.csv").exists());
    }

    #[test]
    fn test_skip_converted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, SHEET).unwrap();
        let options = SplitOptions {
            prefix: Some("t".to_string()),
            skip_converted: true,
            ..Default::default()
        };

        let first = split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();
        assert!(matches!(first, SplitOutcome::Written(ref paths) if paths.len() == 3));

        let second = split_file(&input, dir.path(), &DetectOptions::default(), &options).unwrap();
        assert_eq!(second, SplitOutcome::Skipped);
    }

    #[test]
    fn test_already_converted_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.csv");
        fs::write(&source, "x\n").unwrap();
        assert!(!already_converted(&source, &dir.path().join("missing.csv")).unwrap());
        assert!(already_converted(&source, &source).unwrap());
    }
}
