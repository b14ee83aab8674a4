//! gridtables CLI - find and split the tables packed into a sheet

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gridtables::axis::Occupancy;
use gridtables::prelude::*;
use gridtables::{
    convert_dir, merge_csv, open_grid, split_file, ConvertOptions, MergeOptions, SplitOptions,
    SplitOutcome,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridtables")]
#[command(
    author,
    version,
    about = "Find the separate tables packed into one spreadsheet grid"
)]
struct Cli {
    /// Log detection phases to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the table ranges found in a sheet
    Detect {
        /// Input sheet (csv, tsv)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Write each table in a sheet to its own CSV file
    Split {
        /// Input sheet (csv, tsv)
        input: PathBuf,

        /// Directory for the table files (created if missing)
        #[arg(short, long)]
        output_dir: PathBuf,

        /// File name prefix (default: input file stem)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Appended to each output name before `.csv`
        #[arg(long, default_value = "")]
        tail: String,

        /// Skip the input if its first table file is not older than it
        #[arg(long)]
        skip_converted: bool,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Split every sheet under a directory, mirroring its layout
    Convert {
        /// Directory searched recursively for sheets
        source: PathBuf,

        /// Directory receiving the table files
        target: PathBuf,

        /// Only convert files whose name starts with this
        #[arg(long, default_value = "")]
        file_prefix: String,

        /// Appended to each output name before `.csv`
        #[arg(long, default_value = "")]
        tail: String,

        /// Skip sheets whose first table file is not older than them
        #[arg(long)]
        skip_converted: bool,

        /// Copy each converted sheet next to its tables
        #[arg(long)]
        backup: bool,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Concatenate CSV files that share the first file's header
    Merge {
        /// Directory searched recursively for CSV files
        root: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only merge files whose name starts with this
        #[arg(long, default_value = "")]
        file_prefix: String,

        /// Only merge files whose name ends with `<TAIL>.csv`
        #[arg(long, default_value = "")]
        tail: String,

        /// Delete files whose header does not match
        #[arg(long)]
        delete_mismatched: bool,
    },

    /// Print the occupancy map with each table labelled
    Show {
        /// Input sheet (csv, tsv)
        input: PathBuf,

        #[command(flatten)]
        detect: DetectArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct DetectArgs {
    /// Drop tables with fewer rows than this
    #[arg(long, default_value = "1")]
    min_rows: usize,

    /// Drop tables with fewer columns than this
    #[arg(long, default_value = "1")]
    min_cols: usize,

    /// Widest blank row run bridged inside one table
    #[arg(long, default_value = "1")]
    row_gap: usize,

    /// Widest blank column run bridged inside one table
    #[arg(long, default_value = "0")]
    col_gap: usize,

    /// Treat whitespace-only cells as data
    #[arg(long)]
    strict_empty: bool,

    /// Field delimiter (default: from the file extension)
    #[arg(short, long)]
    delimiter: Option<char>,
}

impl DetectArgs {
    fn options(&self) -> DetectOptions {
        let emptiness = if self.strict_empty {
            Emptiness::Strict
        } else {
            Emptiness::Blank
        };
        DetectOptions::default()
            .with_emptiness(emptiness)
            .with_gap_tolerance(self.row_gap, self.col_gap)
            .with_min_size(self.min_rows, self.min_cols)
    }

    fn read_options(&self) -> Result<Option<CsvReadOptions>> {
        let Some(delimiter) = self.delimiter else {
            return Ok(None);
        };
        if !delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
        }
        Ok(Some(CsvReadOptions {
            delimiter: delimiter as u8,
            ..Default::default()
        }))
    }

    fn load(&self, input: &Path) -> Result<Grid> {
        open_grid(input, self.read_options()?.as_ref())
            .with_context(|| format!("Failed to open '{}'", input.display()))
    }
}

/// One detected table as printed by `detect --format json`
#[derive(Serialize)]
struct RangeReport {
    index: usize,
    a1: String,
    #[serde(flatten)]
    range: TableRange,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Detect {
            input,
            format,
            detect,
        } => detect_tables(&input, format, &detect),
        Commands::Split {
            input,
            output_dir,
            prefix,
            tail,
            skip_converted,
            detect,
        } => {
            let options = SplitOptions {
                prefix,
                tail,
                skip_converted,
                read: detect.read_options()?,
                csv: CsvWriteOptions::default(),
            };
            split(&input, &output_dir, &options, &detect)
        }
        Commands::Convert {
            source,
            target,
            file_prefix,
            tail,
            skip_converted,
            backup,
            detect,
        } => {
            let options = ConvertOptions {
                file_prefix,
                tail,
                skip_converted,
                backup_source: backup,
                read: detect.read_options()?,
                csv: CsvWriteOptions::default(),
            };
            convert(&source, &target, &options, &detect)
        }
        Commands::Merge {
            root,
            output,
            file_prefix,
            tail,
            delete_mismatched,
        } => {
            let options = MergeOptions {
                file_prefix,
                tail,
                delete_mismatched,
                read: CsvReadOptions::default(),
            };
            merge(&root, output.as_deref(), &options)
        }
        Commands::Show { input, detect } => show(&input, &detect),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn detect_tables(input: &Path, format: OutputFormat, args: &DetectArgs) -> Result<()> {
    let grid = args.load(input)?;
    let ranges = find_table_ranges(&grid, &args.options());

    match format {
        OutputFormat::Text => print!("{}", render_text(&grid, &ranges)),
        OutputFormat::Json => {
            let reports: Vec<RangeReport> = ranges
                .iter()
                .enumerate()
                .map(|(i, range)| RangeReport {
                    index: i + 1,
                    a1: range.to_a1_string(grid.origin()),
                    range: *range,
                })
                .collect();
            let json = serde_json::to_string_pretty(&reports).context("Failed to encode ranges")?;
            println!("{json}");
        }
    }

    if ranges.is_empty() {
        eprintln!("Warning: no tables found in '{}'", input.display());
    }
    Ok(())
}

fn split(input: &Path, output_dir: &Path, options: &SplitOptions, args: &DetectArgs) -> Result<()> {
    let outcome = split_file(input, output_dir, &args.options(), options)
        .with_context(|| format!("Failed to split '{}'", input.display()))?;

    match outcome {
        SplitOutcome::Skipped => {
            eprintln!("Skipped '{}': already converted", input.display());
        }
        SplitOutcome::Written(written) => {
            for path in &written {
                println!("{}", path.display());
            }
            eprintln!("Wrote {} tables to '{}'", written.len(), output_dir.display());
        }
    }
    Ok(())
}

fn convert(source: &Path, target: &Path, options: &ConvertOptions, args: &DetectArgs) -> Result<()> {
    let report = convert_dir(source, target, &args.options(), options)
        .with_context(|| format!("Failed to convert '{}'", source.display()))?;

    for path in &report.written {
        println!("{}", path.display());
    }
    for path in &report.skipped {
        eprintln!("Skipped '{}': already converted", path.display());
    }
    eprintln!(
        "Converted {} files into {} tables under '{}'",
        report.converted.len(),
        report.written.len(),
        target.display()
    );
    Ok(())
}

fn merge(root: &Path, output: Option<&Path>, options: &MergeOptions) -> Result<()> {
    let report = merge_csv(root, options)
        .with_context(|| format!("Failed to merge CSV files under '{}'", root.display()))?;

    for (path, mismatch) in &report.rejected {
        let action = if options.delete_mismatched { " (deleted)" } else { "" };
        eprintln!("Rejected '{}': {}{}", path.display(), mismatch, action);
    }

    match output {
        Some(path) => report
            .grid
            .save(path)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => CsvWriter::write_grid(&report.grid, std::io::stdout().lock(), &CsvWriteOptions::default())
            .context("Failed to write merged table")?,
    }
    eprintln!(
        "Merged {} files ({} rows)",
        report.merged.len(),
        report.grid.row_count().saturating_sub(1)
    );
    Ok(())
}

fn show(input: &Path, args: &DetectArgs) -> Result<()> {
    let grid = args.load(input)?;
    let options = args.options();
    let ranges = find_table_ranges(&grid, &options);

    print!("{}", render_map(&grid, &ranges, &options.emptiness));
    println!();
    print!("{}", render_text(&grid, &ranges));
    Ok(())
}

/// One line per range: index, half-open coordinates, A1 reference
fn render_text(grid: &Grid, ranges: &[TableRange]) -> String {
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            format!(
                "{}\t{}\t{}\n",
                label(i),
                range,
                range.to_a1_string(grid.origin())
            )
        })
        .collect()
}

/// Occupancy map: table label for occupied cells, `#` for occupied cells
/// outside every table, `.` for empty cells
fn render_map(grid: &Grid, ranges: &[TableRange], emptiness: &Emptiness) -> String {
    let occupancy = Occupancy::scan(grid, emptiness);
    let mut out = String::with_capacity(grid.row_count() * (grid.col_count() + 1));
    for row in 0..occupancy.row_count() {
        for col in 0..occupancy.col_count() {
            let c = if !occupancy.is_occupied(row, col) {
                '.'
            } else {
                match ranges.iter().position(|r| r.contains_cell(row, col)) {
                    Some(i) => label(i),
                    None => '#',
                }
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// `1`-`9`, then `A`-`Z`, then `*`
fn label(index: usize) -> char {
    const LABELS: &[u8] = b"123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    LABELS.get(index).map(|&b| b as char).unwrap_or('*')
}
