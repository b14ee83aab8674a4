//! Batch splitting of a directory tree

use std::fs;
use std::path::{Path, PathBuf};

use gridtables_core::DetectOptions;
use gridtables_csv::{CsvReadOptions, CsvWriteOptions};
use walkdir::WalkDir;

use crate::error::Result;
use crate::split::{split_file, SplitOptions, SplitOutcome};
use crate::is_supported;

/// Options for [`convert_dir`]
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Only files whose name starts with this are converted
    pub file_prefix: String,
    /// Appended to every output name before `.csv`
    pub tail: String,
    /// Leave a source alone when its first output is not older than it
    pub skip_converted: bool,
    /// Copy each converted source next to its outputs
    pub backup_source: bool,
    /// How sources are parsed; `None` picks by file extension
    pub read: Option<CsvReadOptions>,
    /// How each table is written
    pub csv: CsvWriteOptions,
}

/// What [`convert_dir`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// Sources that were split
    pub converted: Vec<PathBuf>,
    /// Sources whose outputs were already up to date
    pub skipped: Vec<PathBuf>,
    /// Every table file written
    pub written: Vec<PathBuf>,
    /// Source copies placed in the target tree
    pub backups: Vec<PathBuf>,
}

/// Split every matching sheet under `source_root` into `target_root`
///
/// The directory layout below `source_root` is mirrored under
/// `target_root`. Files are visited in file-name order. When `target_root`
/// lies inside `source_root` it is not descended into.
pub fn convert_dir<P, Q>(
    source_root: P,
    target_root: Q,
    detect: &DetectOptions,
    options: &ConvertOptions,
) -> Result<ConvertReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source_root = source_root.as_ref();
    let target_root = target_root.as_ref();
    let sources = collect_sources(source_root, target_root, &options.file_prefix)?;
    tracing::info!(root = %source_root.display(), files = sources.len(), "converting directory");

    let split = SplitOptions {
        prefix: None,
        tail: options.tail.clone(),
        skip_converted: options.skip_converted,
        read: options.read.clone(),
        csv: options.csv.clone(),
    };

    let mut report = ConvertReport::default();
    for source in sources {
        let target_dir = mirrored_dir(&source, source_root, target_root);

        match split_file(&source, &target_dir, detect, &split)? {
            SplitOutcome::Skipped => {
                report.skipped.push(source);
                continue;
            }
            SplitOutcome::Written(paths) => report.written.extend(paths),
        }

        if options.backup_source {
            if let Some(backup) = backup(&source, &target_dir)? {
                report.backups.push(backup);
            }
        }
        report.converted.push(source);
    }

    tracing::info!(
        converted = report.converted.len(),
        skipped = report.skipped.len(),
        tables = report.written.len(),
        "directory converted"
    );
    Ok(report)
}

/// Collected up front so outputs written into the tree are never picked up
fn collect_sources(source_root: &Path, target_root: &Path, file_prefix: &str) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.path() != target_root);

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let accepted = entry.file_name().to_string_lossy().starts_with(file_prefix)
            && is_supported(entry.path());
        if accepted {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

fn mirrored_dir(source: &Path, source_root: &Path, target_root: &Path) -> PathBuf {
    source
        .parent()
        .and_then(|parent| parent.strip_prefix(source_root).ok())
        .map(|relative| target_root.join(relative))
        .unwrap_or_else(|| target_root.to_path_buf())
}

fn backup(source: &Path, target_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(name) = source.file_name() else {
        return Ok(None);
    };
    let target = target_dir.join(name);
    if target == source {
        return Ok(None);
    }
    fs::copy(source, &target)?;
    tracing::debug!(path = %target.display(), "source copied");
    Ok(Some(target))
}
