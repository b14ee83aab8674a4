//! File-level detection through the facade crate

use std::fs;

use gridtables::prelude::*;
use gridtables::{
    convert_dir, detect_file, is_supported, merge_csv, open_grid, split_file, ConvertOptions, CsvError,
    MergeOptions, SplitOptions, SplitOutcome,
};
use pretty_assertions::assert_eq;

/// A sheet with a title cell, two tables side by side, and a notes table
/// below a double blank line
const INVENTORY: &str = "\
Inventory,,,,,
,,,,,
part,qty,,site,code,open
bolt,40,,north,N1,yes
nut,15,,south,S2,no
washer,,,,,
,,,,,
,,,,,
notes,,,,,
recount in may,,,,,
";

fn write_input(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn range(r0: usize, r1: usize, c0: usize, c1: usize) -> TableRange {
    TableRange::new(r0, r1, c0, c1).unwrap()
}

#[test]
fn test_detect_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "inventory.csv", INVENTORY);

    let ranges = detect_file(&path, &DetectOptions::default()).unwrap();
    assert_eq!(
        ranges,
        vec![
            range(0, 1, 0, 1),
            range(2, 6, 0, 2),
            range(2, 5, 3, 6),
            range(8, 10, 0, 1),
        ]
    );
}

#[test]
fn test_min_size_drops_title_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "inventory.csv", INVENTORY);

    let options = DetectOptions::default().with_min_size(2, 2);
    let grid = Grid::open(&path).unwrap();
    let refs: Vec<String> = find_table_ranges(&grid, &options)
        .iter()
        .map(|r| r.to_a1_string(grid.origin()))
        .collect();
    assert_eq!(refs, vec!["A3:B6", "D3:F5"]);
}

#[test]
fn test_tsv_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "pair.tsv", "a\tb\t\tc\n1\t2\t\t3\n");

    let ranges = detect_file(&path, &DetectOptions::default()).unwrap();
    assert_eq!(ranges, vec![range(0, 2, 0, 2), range(0, 2, 3, 4)]);
}

#[test]
fn test_unsupported_extension() {
    let err = detect_file("sheet.xlsx", &DetectOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert_eq!(err.to_string(), "Unsupported file format: sheet.xlsx");
}

#[test]
fn test_missing_file_is_csv_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Grid::open(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Csv(CsvError::Io(_))));
}

#[test]
fn test_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.csv");
    let grid = Grid::from_rows(vec![vec!["a", "", "b"], vec!["1", "", "2"]]).unwrap();

    grid.save(&path).unwrap();
    let back = Grid::open(&path).unwrap();

    assert_eq!(back.get(0, 0), Some(&CellValue::from("a")));
    assert_eq!(back.get(1, 2), Some(&CellValue::Number(2.0)));
    assert_eq!(
        find_table_ranges(&back, &DetectOptions::default()),
        vec![range(0, 2, 0, 1), range(0, 2, 2, 3)]
    );
}

#[test]
fn test_split_tables_then_redetect_each() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "inventory.csv", INVENTORY);
    let out = dir.path().join("tables");

    let options = SplitOptions {
        prefix: Some("inv".to_string()),
        ..Default::default()
    };
    let SplitOutcome::Written(paths) =
        split_file(&input, &out, &DetectOptions::default(), &options).unwrap()
    else {
        panic!("expected files to be written");
    };
    assert_eq!(paths.len(), 4);
    assert_eq!(paths[1], out.join("inv_2.csv"));
    assert_eq!(
        fs::read_to_string(&paths[1]).unwrap(),
        "part,qty\nbolt,40\nnut,15\nwasher,\n"
    );

    for path in &paths {
        let grid = Grid::open(path).unwrap();
        assert_eq!(
            find_table_ranges(&grid, &DetectOptions::default()),
            vec![grid.full_range().unwrap()]
        );
    }
}

#[test]
fn test_open_grid_with_explicit_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "pipes.log", "a|b||c\n1|2||3\n");
    assert!(!is_supported(&path));
    assert!(matches!(Grid::open(&path), Err(Error::UnsupportedFormat(_))));

    let read = CsvReadOptions {
        delimiter: b'|',
        ..Default::default()
    };
    let grid = open_grid(&path, Some(&read)).unwrap();
    assert_eq!(
        find_table_ranges(&grid, &DetectOptions::default()),
        vec![range(0, 2, 0, 2), range(0, 2, 3, 4)]
    );
}

#[test]
fn test_convert_tree_then_merge_tables() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sheets");
    let dst = dir.path().join("tables");
    fs::create_dir_all(src.join("2024")).unwrap();
    fs::write(
        src.join("2024").join("stock_jan.csv"),
        "part,qty\nbolt,40\n\n\nnote\nrecount\n",
    )
    .unwrap();
    fs::write(src.join("stock_feb.csv"), "part,qty\nnut,15\nwasher,3\n").unwrap();

    let convert = ConvertOptions {
        file_prefix: "stock".to_string(),
        tail: "_T".to_string(),
        ..Default::default()
    };
    let report = convert_dir(&src, &dst, &DetectOptions::default(), &convert).unwrap();
    assert_eq!(report.converted.len(), 2);
    assert!(dst.join("2024").join("stock_jan_2_T.csv").exists());

    let merge = MergeOptions {
        file_prefix: "stock".to_string(),
        tail: "_T".to_string(),
        ..Default::default()
    };
    let merged = merge_csv(&dst, &merge).unwrap();

    assert_eq!(
        merged.merged,
        vec![dst.join("2024").join("stock_jan_1_T.csv"), dst.join("stock_feb_1_T.csv")]
    );
    assert_eq!(merged.rejected.len(), 1);
    assert_eq!(merged.rejected[0].0, dst.join("2024").join("stock_jan_2_T.csv"));

    let out = dir.path().join("merged.csv");
    merged.grid.save(&out).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "part,qty\nbolt,40\nnut,15\nwasher,3\n"
    );
}
